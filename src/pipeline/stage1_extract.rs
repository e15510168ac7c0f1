use serde::Serialize;
use tracing::{debug, warn};

use crate::model::record::{FieldValue, LabField, LabRecord, Provenance};
use crate::model::thresholds::Units;
use crate::rules::{MissKind, RuleSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractMiss {
    pub field: LabField,
    pub rule: &'static str,
    #[serde(flatten)]
    pub kind: MissKind,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub record: LabRecord,
    pub diagnostics: Vec<ExtractMiss>,
}

/// Page breaks and carriage returns become `\n`; any other run of
/// whitespace collapses to a single space.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut pending_space = false;
    while let Some(c) = chars.next() {
        let c = match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    continue;
                }
                '\n'
            }
            '\u{0c}' => '\n',
            other => other,
        };
        if c == '\n' {
            pending_space = false;
            out.push('\n');
        } else if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Unitless values are read in `units` and converted like any other.
pub fn run_stage1(raw_text: &str, rules: &RuleSet, units: &Units) -> Stage1Output {
    let text = normalize_text(raw_text);
    let mut record = LabRecord::default();
    let mut diagnostics = Vec::new();

    for field in LabField::ALL {
        let Some((rule, value)) = extract_field(&text, field, rules, units, &mut diagnostics) else {
            debug!(%field, "field not found in text");
            diagnostics.push(ExtractMiss {
                field,
                rule: "*",
                kind: MissKind::NotFound,
            });
            continue;
        };
        debug!(%field, rule, "field extracted");
        if let Err(err) = record.set(field, value, Provenance::Extracted) {
            warn!(%field, rule, "discarding extracted value: {err}");
        }
    }

    Stage1Output {
        record,
        diagnostics,
    }
}

fn extract_field(
    text: &str,
    field: LabField,
    rules: &RuleSet,
    units: &Units,
    diagnostics: &mut Vec<ExtractMiss>,
) -> Option<(&'static str, FieldValue)> {
    for rule in rules.for_field(field) {
        let mut misses = Vec::new();
        let value = rule.evaluate(text, units, &mut misses);
        for kind in misses {
            if let MissKind::InvalidNumericFormat { token } = &kind {
                warn!(%field, rule = rule.name, token = token.as_str(), "unparseable numeric token");
            }
            diagnostics.push(ExtractMiss {
                field,
                rule: rule.name,
                kind,
            });
        }
        if let Some(value) = value {
            return Some((rule.name, value));
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
