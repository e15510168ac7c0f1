pub mod json;
pub mod text;

use crate::input::overrides::RejectedOverride;
use crate::model::record::LabRecord;
use crate::pipeline::stage1_extract::ExtractMiss;
use crate::pipeline::stage5_interpret::{InterpretedComposite, InterpretedScore};

pub const NA: &str = "NA";
pub const DISCLAIMER: &str = "Screening & education only; not medical advice.";
pub const COMPOSITE_PRECISION: usize = 1;

/// Everything the renderers need: the record that was scored, one entry per
/// score, the composite, the extraction diagnostics and any override that
/// was refused.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub tool_name: String,
    pub tool_version: String,
    pub record: LabRecord,
    pub scores: Vec<InterpretedScore>,
    pub composite: InterpretedComposite,
    pub diagnostics: Vec<ExtractMiss>,
    pub rejected_overrides: Vec<RejectedOverride>,
}

pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => NA.to_string(),
    }
}

pub fn format_score(score: &InterpretedScore) -> String {
    format_value(score.result.value, score.result.id.display_precision())
}

pub fn format_composite(composite: &InterpretedComposite) -> String {
    format_value(composite.result.value, COMPOSITE_PRECISION)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
