use serde::Serialize;

use crate::input::overrides::RejectedOverride;
use crate::model::record::LabRecord;
use crate::pipeline::stage1_extract::ExtractMiss;
use crate::pipeline::stage5_interpret::{InterpretedComposite, InterpretedScore};
use crate::report::{ReportBundle, format_composite, format_score};

#[derive(Serialize)]
struct ScoreJson<'a> {
    #[serde(flatten)]
    score: &'a InterpretedScore,
    display: String,
}

#[derive(Serialize)]
struct CompositeJson<'a> {
    #[serde(flatten)]
    composite: &'a InterpretedComposite,
    display: String,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    tool: &'a str,
    version: &'a str,
    record: &'a LabRecord,
    scores: Vec<ScoreJson<'a>>,
    composite: CompositeJson<'a>,
    diagnostics: &'a [ExtractMiss],
    rejected_overrides: &'a [RejectedOverride],
}

pub fn render_summary_json(bundle: &ReportBundle) -> serde_json::Result<String> {
    let summary = SummaryJson {
        tool: &bundle.tool_name,
        version: &bundle.tool_version,
        record: &bundle.record,
        scores: bundle
            .scores
            .iter()
            .map(|score| ScoreJson {
                score,
                display: format_score(score),
            })
            .collect(),
        composite: CompositeJson {
            composite: &bundle.composite,
            display: format_composite(&bundle.composite),
        },
        diagnostics: &bundle.diagnostics,
        rejected_overrides: &bundle.rejected_overrides,
    };
    serde_json::to_string_pretty(&summary)
}

/// The extracted record alone, for the `extract` subcommand.
pub fn render_record_json(
    record: &LabRecord,
    diagnostics: &[ExtractMiss],
) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct ExtractJson<'a> {
        record: &'a LabRecord,
        diagnostics: &'a [ExtractMiss],
    }
    serde_json::to_string_pretty(&ExtractJson {
        record,
        diagnostics,
    })
}
