use super::*;
use pretty_assertions::assert_eq;

use crate::model::bands::RiskBand;
use crate::model::scores::{InsufficientData, ScoreId};

#[test]
fn test_scores_get_their_own_tables() {
    let scores = vec![
        ScoreResult::present(ScoreId::Fli, 75.0, RiskBand::High, Vec::new()),
        ScoreResult::present(ScoreId::Fib4, 3.1, RiskBand::High, Vec::new()),
    ];
    let out = run_stage5(scores, CompositeResult::absent());
    assert_eq!(out.scores[0].interpretation.label, "High (fatty liver likely)");
    assert_eq!(out.scores[1].interpretation.label, "High");
    assert_eq!(out.scores[1].result.value, Some(3.1));
}

#[test]
fn test_absent_score_is_insufficient() {
    let scores = vec![ScoreResult::absent(
        ScoreId::Apri,
        InsufficientData::DiabetesUnknown,
    )];
    let out = run_stage5(scores, CompositeResult::absent());
    assert_eq!(out.scores[0].interpretation.band, RiskBand::InsufficientData);
    assert_eq!(out.composite.interpretation.label, "Insufficient data");
}

#[test]
fn test_composite_interpretation() {
    let composite = CompositeResult {
        value: Some(72.0),
        subscores: Vec::new(),
        band: RiskBand::High,
    };
    let out = run_stage5(Vec::new(), composite);
    assert_eq!(out.composite.interpretation.label, "High risk");
    assert_eq!(out.composite.result.value, Some(72.0));
}

#[test]
fn test_interpretation_is_deterministic() {
    let make = || {
        run_stage5(
            vec![ScoreResult::present(
                ScoreId::Nfs,
                -0.2,
                RiskBand::Indeterminate,
                Vec::new(),
            )],
            CompositeResult::absent(),
        )
    };
    assert_eq!(make().scores, make().scores);
}
