use tracing::info;

use crate::model::bands::{BandCutoffs, SubscoreAnchors};
use crate::model::scores::{CompositeResult, ScoreResult, Subscore};
use crate::model::thresholds::ScoringProfile;

const THIRD: f64 = 100.0 / 3.0;

/// Linear ramp from `[from, to]` onto `[out_lo, out_hi]`, saturating at both
/// ends.
fn ramp(value: f64, from: f64, to: f64, out_lo: f64, out_hi: f64) -> f64 {
    let t = if to > from {
        ((value - from) / (to - from)).clamp(0.0, 1.0)
    } else if value < from {
        0.0
    } else {
        1.0
    };
    out_lo + t * (out_hi - out_lo)
}

/// 0-100 risk subscore. Each band owns a third of the scale: low maps
/// `[floor, low]` onto `[0, 33.3]`, indeterminate maps `[low, high]` onto
/// `[33.3, 66.7]`, high maps `[high, ceiling]` onto `[66.7, 100]`.
pub fn subscore(value: f64, cutoffs: &BandCutoffs, anchors: &SubscoreAnchors) -> f64 {
    let s = if value <= cutoffs.low {
        ramp(value, anchors.floor, cutoffs.low, 0.0, THIRD)
    } else if value <= cutoffs.high {
        ramp(value, cutoffs.low, cutoffs.high, THIRD, 2.0 * THIRD)
    } else {
        ramp(value, cutoffs.high, anchors.ceiling, 2.0 * THIRD, 100.0)
    };
    s.clamp(0.0, 100.0)
}

/// Weighted mean of the available subscores. Weights are renormalised over
/// the scores that are present; with none present the composite is absent.
pub fn run_stage4(scores: &[ScoreResult], profile: &ScoringProfile) -> CompositeResult {
    let mut available = Vec::new();
    for score in scores {
        let (Some(value), Some(weight), Some(anchors)) = (
            score.value,
            profile.weight(score.id),
            profile.anchors(score.id),
        ) else {
            continue;
        };
        let s = subscore(value, profile.cutoffs(score.id), anchors);
        available.push((score.id, value, s, weight));
    }

    let total_weight: f64 = available.iter().map(|(_, _, _, w)| w).sum();
    if available.is_empty() || total_weight <= 0.0 {
        info!("composite not computed: no weighted score available");
        return CompositeResult::absent();
    }

    let subscores: Vec<Subscore> = available
        .into_iter()
        .map(|(id, value, s, weight)| {
            let weight_used = weight / total_weight;
            Subscore {
                id,
                score_value: value,
                subscore: s,
                weight_used,
                contribution: weight_used * s,
            }
        })
        .collect();

    let value = subscores
        .iter()
        .map(|s| s.contribution)
        .sum::<f64>()
        .clamp(0.0, 100.0);

    CompositeResult {
        value: Some(value),
        band: profile.composite.classify(value),
        subscores,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_composite.rs"]
mod tests;
