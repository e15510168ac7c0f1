use serde::Serialize;

use crate::model::interpretation::{Interpretation, Metric, lookup};
use crate::model::scores::{CompositeResult, ScoreResult};
use crate::pipeline::stage3_scores::SCORE_MODULES;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub interpretation: Interpretation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedComposite {
    #[serde(flatten)]
    pub result: CompositeResult,
    pub interpretation: Interpretation,
}

#[derive(Debug, Clone)]
pub struct Stage5Output {
    pub scores: Vec<InterpretedScore>,
    pub composite: InterpretedComposite,
}

fn interpret_score(result: ScoreResult) -> InterpretedScore {
    let interpretation = SCORE_MODULES
        .iter()
        .find(|m| m.id() == result.id)
        .map(|m| m.interpret(result.band))
        .unwrap_or_else(|| lookup(Metric::Score(result.id), result.band));
    InterpretedScore {
        result,
        interpretation,
    }
}

pub fn run_stage5(scores: Vec<ScoreResult>, composite: CompositeResult) -> Stage5Output {
    let scores = scores.into_iter().map(interpret_score).collect();
    let interpretation = lookup(Metric::Composite, composite.band);
    Stage5Output {
        scores,
        composite: InterpretedComposite {
            result: composite,
            interpretation,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_interpret.rs"]
mod tests;
