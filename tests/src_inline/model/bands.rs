use super::*;

#[test]
fn test_exclusive_cutoffs() {
    let c = BandCutoffs::new(1.30, false, 2.67, false);
    assert_eq!(c.classify(1.29), RiskBand::Low);
    assert_eq!(c.classify(1.30), RiskBand::Indeterminate);
    assert_eq!(c.classify(2.67), RiskBand::Indeterminate);
    assert_eq!(c.classify(2.68), RiskBand::High);
}

#[test]
fn test_inclusive_cutoffs() {
    let c = BandCutoffs::new(0.5, true, 60.0, true);
    assert_eq!(c.classify(0.5), RiskBand::Low);
    assert_eq!(c.classify(60.0), RiskBand::High);
    assert_eq!(c.classify(30.0), RiskBand::Indeterminate);
}

#[test]
fn test_non_finite_is_insufficient() {
    let c = BandCutoffs::new(1.0, false, 2.0, false);
    assert_eq!(c.classify(f64::NAN), RiskBand::InsufficientData);
    assert_eq!(c.classify(f64::INFINITY), RiskBand::InsufficientData);
}

#[test]
fn test_ordering_checks() {
    let c = BandCutoffs::new(1.0, false, 2.0, false);
    assert!(c.is_ordered());
    assert!(!BandCutoffs::new(3.0, false, 2.0, false).is_ordered());
    assert!(SubscoreAnchors::new(0.0, 4.0).is_ordered_around(&c));
    assert!(!SubscoreAnchors::new(1.5, 4.0).is_ordered_around(&c));
}
