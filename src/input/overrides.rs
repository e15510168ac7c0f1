use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::record::{Field, FieldValue, LabField, LabRecord, Provenance, Sex};

/// Values typed in by the user. Every present key becomes a user-entered
/// field and takes precedence over anything extracted from text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserOverrides {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    pub ast: Option<f64>,
    pub alt: Option<f64>,
    pub ggt: Option<f64>,
    pub triglycerides: Option<f64>,
    pub platelets: Option<f64>,
    pub albumin: Option<f64>,
    pub bmi: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub waist: Option<f64>,
    pub uln_ast: Option<f64>,
    pub diabetes: Option<bool>,
}

/// An override that failed record validation. The field keeps whatever
/// extraction found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedOverride {
    pub field: LabField,
    pub value: f64,
    pub reason: String,
}

impl UserOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Builds a record holding only the overridden fields. A negative or
    /// non-finite number is left out of the record and reported back; the
    /// other fields are unaffected.
    pub fn to_record(&self) -> (LabRecord, Vec<RejectedOverride>) {
        let mut record = LabRecord::default();
        if let Some(name) = &self.name {
            record.name.apply(Field::user(name.trim().to_string()));
        }
        if let Some(sex) = self.sex {
            record.sex.apply(Field::user(sex));
        }
        if let Some(diabetes) = self.diabetes {
            record.diabetes.apply(Field::user(diabetes));
        }

        let numbers = [
            (LabField::Age, self.age),
            (LabField::Ast, self.ast),
            (LabField::Alt, self.alt),
            (LabField::Ggt, self.ggt),
            (LabField::Triglycerides, self.triglycerides),
            (LabField::Platelets, self.platelets),
            (LabField::Albumin, self.albumin),
            (LabField::Bmi, self.bmi),
            (LabField::Weight, self.weight),
            (LabField::Height, self.height),
            (LabField::Waist, self.waist),
            (LabField::UlnAst, self.uln_ast),
        ];
        let mut rejected = Vec::new();
        for (field, value) in numbers {
            let Some(v) = value else {
                continue;
            };
            if let Err(err) = record.set(field, FieldValue::Number(v), Provenance::UserEntered) {
                warn!(%field, value = v, "rejecting override: {err}");
                rejected.push(RejectedOverride {
                    field,
                    value: v,
                    reason: err.to_string(),
                });
            }
        }
        (record, rejected)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/overrides.rs"]
mod tests;
