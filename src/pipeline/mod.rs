pub mod stage1_extract;
pub mod stage2_merge;
pub mod stage3_scores;
pub mod stage4_composite;
pub mod stage5_interpret;
pub mod stage6_report;

use crate::input::overrides::{RejectedOverride, UserOverrides};
use crate::model::record::LabRecord;
use crate::model::thresholds::ScoringProfile;
use crate::rules::RuleSet;
use stage1_extract::{ExtractMiss, run_stage1};
use stage2_merge::run_stage2;
use stage3_scores::run_stage3;
use stage4_composite::run_stage4;
use stage5_interpret::{InterpretedComposite, InterpretedScore, run_stage5};

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub record: LabRecord,
    pub scores: Vec<InterpretedScore>,
    pub composite: InterpretedComposite,
    pub diagnostics: Vec<ExtractMiss>,
    pub rejected_overrides: Vec<RejectedOverride>,
}

/// Text in, interpreted scores out. Nothing here fails: every gap shows up
/// as an absent field or score, a diagnostic, or a rejected override.
pub fn run_pipeline(
    text: &str,
    overrides: &UserOverrides,
    rules: &RuleSet,
    profile: &ScoringProfile,
) -> PipelineOutput {
    let stage1 = run_stage1(text, rules, &profile.units);
    let stage2 = run_stage2(stage1.record, overrides);
    let record = stage2.record;

    let scores = run_stage3(&record, profile);
    let composite = run_stage4(&scores, profile);
    let stage5 = run_stage5(scores, composite);

    PipelineOutput {
        record,
        scores: stage5.scores,
        composite: stage5.composite,
        diagnostics: stage1.diagnostics,
        rejected_overrides: stage2.rejected,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
