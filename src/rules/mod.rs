pub mod defs;
pub mod number;
pub mod units;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::model::record::{FieldValue, LabField, Sex};
use crate::model::thresholds::Units;
use defs::{RuleDef, builtin_rules};
use number::{parse_integer, parse_number};
use units::normalize_unit;

/// Why a rule produced no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissKind {
    NotFound,
    InvalidNumericFormat { token: String },
    RangeBound { token: String },
    UnitExponent { token: String },
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub field: LabField,
    pub name: &'static str,
    regex: Regex,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn builtin() -> Result<Self, regex::Error> {
        Self::compile(builtin_rules())
    }

    pub fn compile(defs: Vec<RuleDef>) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(defs.len());
        for def in defs {
            rules.push(Rule {
                field: def.field,
                name: def.name,
                regex: Regex::new(&def.pattern)?,
            });
        }
        Ok(Self { rules })
    }

    /// Rules for `field` in priority order.
    pub fn for_field(&self, field: LabField) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.field == field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule {
    /// Scans every match of this rule in order and returns the first one that
    /// yields a usable value. Rejected candidates are appended to `misses`.
    pub fn evaluate(
        &self,
        text: &str,
        units: &Units,
        misses: &mut Vec<MissKind>,
    ) -> Option<FieldValue> {
        for caps in self.regex.captures_iter(text) {
            match self.read(text, &caps, units) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(miss) => misses.push(miss),
            }
        }
        None
    }

    fn read(
        &self,
        text: &str,
        caps: &Captures<'_>,
        units: &Units,
    ) -> Result<Option<FieldValue>, MissKind> {
        if self.field == LabField::UlnAst {
            return read_interval_upper(caps).map(Some);
        }
        let Some(value_match) = caps.name("value") else {
            return Ok(None);
        };
        let token = value_match.as_str();
        if caps.name("range").is_some() {
            return Err(MissKind::RangeBound {
                token: token.to_string(),
            });
        }

        let value = match self.field {
            LabField::Name => {
                let name = token.split_whitespace().collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Ok(None);
                }
                FieldValue::Text(name)
            }
            LabField::Sex => match Sex::parse_token(token) {
                Some(sex) => FieldValue::Sex(sex),
                None => return Ok(None),
            },
            LabField::Age => FieldValue::Integer(parse_integer(token).map_err(invalid)?),
            LabField::Diabetes => match parse_flag(token) {
                Some(flag) => FieldValue::Flag(flag),
                None => return Ok(None),
            },
            field => {
                // `10` of `10^3/uL` or `3` of `x10^3/uL` in a column header.
                if is_unit_exponent(text, value_match.start(), value_match.end()) {
                    return Err(MissKind::UnitExponent {
                        token: token.to_string(),
                    });
                }
                let raw = parse_number(token).map_err(invalid)?;
                let unit = caps.name("unit").map(|m| m.as_str());
                FieldValue::Number(normalize_unit(field, raw, unit, units))
            }
        };
        Ok(Some(value))
    }
}

fn read_interval_upper(caps: &Captures<'_>) -> Result<FieldValue, MissKind> {
    let lower = caps.name("lower").map(|m| m.as_str()).unwrap_or_default();
    let upper = caps.name("upper").map(|m| m.as_str()).unwrap_or_default();
    let lower = parse_number(lower).map_err(invalid)?;
    let upper = parse_number(upper).map_err(invalid)?;
    Ok(FieldValue::Number(lower.max(upper)))
}

fn is_unit_exponent(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].trim_start_matches([' ', '\t']).chars().next();
    before == Some('^') || matches!(after, Some('^' | '³' | '⁹'))
}

fn parse_flag(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "present" | "positive" => Some(true),
        "no" | "n" | "absent" | "negative" => Some(false),
        _ => None,
    }
}

fn invalid(err: number::InvalidNumber) -> MissKind {
    MissKind::InvalidNumericFormat { token: err.0 }
}

#[cfg(test)]
#[path = "../../tests/src_inline/rules/tests.rs"]
mod tests;
