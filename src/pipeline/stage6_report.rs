use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::model::interpretation::Metric;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ReportBundle, format_composite, format_score};

pub const SUMMARY_FILE: &str = "summary.json";
pub const SCORES_FILE: &str = "scores.tsv";
pub const REPORT_FILE: &str = "report.txt";

pub fn write_reports(bundle: &ReportBundle, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let summary_path = out_dir.join(SUMMARY_FILE);
    let json = render_summary_json(bundle)?;
    write_text(&summary_path, &json)?;

    let scores_path = out_dir.join(SCORES_FILE);
    write_text(&scores_path, &render_scores_tsv(bundle))?;

    let report_path = out_dir.join(REPORT_FILE);
    write_text(&report_path, &render_report_text(bundle))?;

    info!(
        out_dir = %out_dir.display(),
        "wrote {SUMMARY_FILE}, {SCORES_FILE}, {REPORT_FILE}"
    );
    Ok(())
}

pub fn render_scores_tsv(bundle: &ReportBundle) -> String {
    let mut out = String::new();
    out.push_str(&["metric", "value", "band", "label", "guidance"].join("\t"));
    out.push('\n');

    for score in &bundle.scores {
        let row = [
            score.result.id.name().to_string(),
            format_score(score),
            score.result.band.as_str().to_string(),
            score.interpretation.label.to_string(),
            score.interpretation.guidance.to_string(),
        ];
        out.push_str(&row.join("\t"));
        out.push('\n');
    }

    let composite = &bundle.composite;
    let row = [
        Metric::Composite.name().to_string(),
        format_composite(composite),
        composite.result.band.as_str().to_string(),
        composite.interpretation.label.to_string(),
        composite.interpretation.guidance.to_string(),
    ];
    out.push_str(&row.join("\t"));
    out.push('\n');
    out
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
