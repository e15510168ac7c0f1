use super::*;
use indoc::indoc;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_report_text_joins_pages() {
    let a = temp_file("AST 40 U/L");
    let b = temp_file("ALT 30 U/L");
    let text = load_report_text(&[a.path().to_path_buf(), b.path().to_path_buf()]).unwrap();
    assert_eq!(text, "AST 40 U/L\n\u{0c}\nALT 30 U/L");
}

#[test]
fn test_load_report_text_requires_input() {
    assert!(matches!(
        load_report_text(&[]),
        Err(InputError::MissingInput(_))
    ));
}

#[test]
fn test_load_report_text_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    assert!(matches!(
        load_report_text(&[missing]),
        Err(InputError::Io { .. })
    ));
}

#[test]
fn test_load_overrides() {
    let file = temp_file(r#"{"sex": "F", "age": 61, "platelets": 150.0, "diabetes": true}"#);
    let overrides = load_overrides(file.path()).unwrap();
    assert_eq!(overrides.sex, Some(crate::model::record::Sex::Female));
    assert_eq!(overrides.age, Some(61.0));
    assert_eq!(overrides.platelets, Some(150.0));
    assert_eq!(overrides.diabetes, Some(true));
    assert_eq!(overrides.ast, None);
}

#[test]
fn test_load_overrides_rejects_unknown_key() {
    let file = temp_file(r#"{"platelet": 150}"#);
    assert!(matches!(
        load_overrides(file.path()),
        Err(InputError::Overrides { .. })
    ));
}

#[test]
fn test_default_profile_without_path() {
    assert_eq!(load_profile(None).unwrap(), ScoringProfile::default_v1());
}

#[test]
fn test_partial_profile_keeps_defaults() {
    let file = temp_file(indoc! {r#"
        assume_no_diabetes_when_absent = false

        [weights]
        fib4 = 0.5
        apri = 0.25
        nfs = 0.25
    "#});
    let profile = load_profile(Some(file.path())).unwrap();
    assert!(!profile.assume_no_diabetes_when_absent);
    assert_eq!(profile.weights.fib4, 0.5);
    assert_eq!(profile.fib4, ScoringProfile::default_v1().fib4);
}

#[test]
fn test_profile_cutoff_override() {
    let profile = parse_profile(indoc! {r#"
        [apri]
        low = 0.5
        low_inclusive = true
        high = 1.0
    "#})
    .unwrap();
    assert_eq!(profile.apri.high, 1.0);
    assert!(!profile.apri.high_inclusive);
    assert_eq!(profile.validate(), Ok(()));
}

#[test]
fn test_invalid_profile_rejected() {
    let file = temp_file(indoc! {r#"
        [weights]
        fib4 = 0.9
    "#});
    assert!(matches!(
        load_profile(Some(file.path())),
        Err(InputError::InvalidProfile {
            source: ProfileError::WeightSum(_),
            ..
        })
    ));
}

#[test]
fn test_malformed_profile_rejected() {
    let file = temp_file("weights = [");
    assert!(matches!(
        load_profile(Some(file.path())),
        Err(InputError::Profile { .. })
    ));
}

#[test]
fn test_profile_units() {
    let file = temp_file(indoc! {r#"
        [units]
        albumin = "g/L"
        platelets = "x10^3/uL"
    "#});
    let profile = load_profile(Some(file.path())).unwrap();
    assert_eq!(profile.units.albumin, "g/L");
    assert_eq!(profile.units.enzymes, "U/L");

    let file = temp_file(indoc! {r#"
        [units]
        albumin = "mmol/L"
    "#});
    assert!(matches!(
        load_profile(Some(file.path())),
        Err(InputError::InvalidProfile {
            source: ProfileError::UnsupportedUnit { key: "albumin", .. },
            ..
        })
    ));
}
