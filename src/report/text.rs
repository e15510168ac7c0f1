use crate::model::interpretation::Metric;
use crate::model::record::{LabField, LabRecord, Provenance};
use crate::report::{DISCLAIMER, ReportBundle, format_composite, format_score, format_value};

const DASH: &str = "—";

pub fn render_report_text(bundle: &ReportBundle) -> String {
    let mut out = String::new();

    out.push_str("Liver Fibrosis Risk Report\n");
    out.push_str("==========================\n\n");

    out.push_str(&patient_line(&bundle.record));
    out.push_str("\n\n");

    out.push_str("1. Inputs\n");
    for field in LabField::ALL {
        if matches!(field, LabField::Name | LabField::Sex | LabField::Age) {
            continue;
        }
        out.push_str(&input_line(&bundle.record, field));
    }
    for rejected in &bundle.rejected_overrides {
        out.push_str(&format!(
            "  rejected override {} = {}: {}\n",
            rejected.field, rejected.value, rejected.reason
        ));
    }
    out.push('\n');

    out.push_str("2. Scores\n");
    for score in &bundle.scores {
        out.push_str(&format!(
            "{}: {} | {} | {}\n",
            score.result.id,
            format_score(score),
            score.interpretation.label,
            score.interpretation.guidance
        ));
        if let Some(reason) = &score.result.reason_if_absent {
            out.push_str(&format!("  reason: {reason}\n"));
        }
        for note in &score.result.notes {
            out.push_str(&format!("  note: {note}\n"));
        }
    }
    out.push('\n');

    let composite = &bundle.composite;
    out.push_str("3. Composite\n");
    out.push_str(&format!(
        "{}: {} | {} | {}\n",
        Metric::Composite.name(),
        format_composite(composite),
        composite.interpretation.label,
        composite.interpretation.guidance
    ));
    for s in &composite.result.subscores {
        out.push_str(&format!(
            "  {}: subscore {} x weight {} = {}\n",
            s.id,
            format_value(Some(s.subscore), 1),
            format_value(Some(s.weight_used), 3),
            format_value(Some(s.contribution), 1)
        ));
    }
    out.push('\n');

    out.push_str(&format!("Disclaimer: {DISCLAIMER}\n"));
    out
}

fn patient_line(record: &LabRecord) -> String {
    let name = record.name.value.as_deref().unwrap_or(DASH);
    let sex = match record.sex.get() {
        Some(sex) => sex.as_str(),
        None => DASH,
    };
    let age = record
        .age
        .get()
        .map(|a| a.to_string())
        .unwrap_or_else(|| DASH.to_string());
    format!("Patient: {name}   Sex: {sex}   Age: {age}")
}

fn input_line(record: &LabRecord, field: LabField) -> String {
    let value = if field == LabField::Diabetes {
        match record.diabetes.get() {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => DASH.to_string(),
        }
    } else {
        record
            .numeric(field)
            .map(|v| format_value(Some(v), 2))
            .unwrap_or_else(|| DASH.to_string())
    };
    let source = match record.provenance(field) {
        Provenance::Extracted => "extracted",
        Provenance::UserEntered => "user-entered",
        Provenance::Absent => "absent",
    };
    format!("  {field}: {value} ({source})\n")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
