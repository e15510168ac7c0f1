use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Extracted,
    UserEntered,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "m", alias = "M", alias = "Male", alias = "MALE")]
    Male,
    #[serde(alias = "f", alias = "F", alias = "Female", alias = "FEMALE")]
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Sex::Male),
            "f" | "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabField {
    Name,
    Sex,
    Age,
    Ast,
    Alt,
    Ggt,
    Triglycerides,
    Platelets,
    Albumin,
    Bmi,
    Weight,
    Height,
    Waist,
    UlnAst,
    Diabetes,
}

impl LabField {
    pub const ALL: [LabField; 15] = [
        LabField::Name,
        LabField::Sex,
        LabField::Age,
        LabField::Ast,
        LabField::Alt,
        LabField::Ggt,
        LabField::Triglycerides,
        LabField::Platelets,
        LabField::Albumin,
        LabField::Bmi,
        LabField::Weight,
        LabField::Height,
        LabField::Waist,
        LabField::UlnAst,
        LabField::Diabetes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LabField::Name => "name",
            LabField::Sex => "sex",
            LabField::Age => "age",
            LabField::Ast => "ast",
            LabField::Alt => "alt",
            LabField::Ggt => "ggt",
            LabField::Triglycerides => "triglycerides",
            LabField::Platelets => "platelets",
            LabField::Albumin => "albumin",
            LabField::Bmi => "bmi",
            LabField::Weight => "weight",
            LabField::Height => "height",
            LabField::Waist => "waist",
            LabField::UlnAst => "uln_ast",
            LabField::Diabetes => "diabetes",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, LabField::Name | LabField::Sex | LabField::Diabetes)
    }
}

impl std::fmt::Display for LabField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A typed value headed for one `LabField`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Sex(Sex),
    Integer(u32),
    Number(f64),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{field} must be non-negative, got {value}")]
    OutOfRange { field: LabField, value: f64 },
    #[error("{field} is not a finite number")]
    NonFinite { field: LabField },
    #[error("{field} cannot hold a value of this type")]
    TypeMismatch { field: LabField },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field<T> {
    pub value: Option<T>,
    pub provenance: Provenance,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> Field<T> {
    pub fn absent() -> Self {
        Self {
            value: None,
            provenance: Provenance::Absent,
        }
    }

    pub fn extracted(value: T) -> Self {
        Self {
            value: Some(value),
            provenance: Provenance::Extracted,
        }
    }

    pub fn user(value: T) -> Self {
        Self {
            value: Some(value),
            provenance: Provenance::UserEntered,
        }
    }

    pub fn with_provenance(value: T, provenance: Provenance) -> Self {
        match provenance {
            Provenance::Extracted => Self::extracted(value),
            Provenance::UserEntered => Self::user(value),
            Provenance::Absent => Self::absent(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Last write wins, except that an extracted value never displaces a
    /// user-entered one.
    pub fn apply(&mut self, incoming: Field<T>) {
        if incoming.value.is_none() {
            return;
        }
        if self.provenance == Provenance::UserEntered
            && incoming.provenance != Provenance::UserEntered
        {
            return;
        }
        *self = incoming;
    }
}

impl<T: Copy> Field<T> {
    pub fn get(&self) -> Option<T> {
        self.value
    }
}

/// Per-run lab snapshot. Built by extraction, overlaid with user input, then
/// handed read-only to scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabRecord {
    pub name: Field<String>,
    pub sex: Field<Sex>,
    pub age: Field<u32>,
    pub ast: Field<f64>,
    pub alt: Field<f64>,
    pub ggt: Field<f64>,
    pub triglycerides: Field<f64>,
    pub platelets: Field<f64>,
    pub albumin: Field<f64>,
    pub bmi: Field<f64>,
    pub weight: Field<f64>,
    pub height: Field<f64>,
    pub waist: Field<f64>,
    pub uln_ast: Field<f64>,
    pub diabetes: Field<bool>,
}

impl LabRecord {
    pub fn sex(&self) -> Sex {
        self.sex.get().unwrap_or(Sex::Unknown)
    }

    pub fn provenance(&self, field: LabField) -> Provenance {
        match field {
            LabField::Name => self.name.provenance,
            LabField::Sex => self.sex.provenance,
            LabField::Age => self.age.provenance,
            LabField::Diabetes => self.diabetes.provenance,
            other => self
                .number_field(other)
                .map(|f| f.provenance)
                .unwrap_or(Provenance::Absent),
        }
    }

    pub fn is_present(&self, field: LabField) -> bool {
        match field {
            LabField::Name => self.name.is_present(),
            LabField::Sex => self.sex.is_present(),
            LabField::Diabetes => self.diabetes.is_present(),
            other => self.numeric(other).is_some(),
        }
    }

    /// Numeric view of a field; age is widened to `f64`.
    pub fn numeric(&self, field: LabField) -> Option<f64> {
        match field {
            LabField::Age => self.age.get().map(f64::from),
            other => self.number_field(other).and_then(|f| f.get()),
        }
    }

    fn number_field(&self, field: LabField) -> Option<&Field<f64>> {
        match field {
            LabField::Ast => Some(&self.ast),
            LabField::Alt => Some(&self.alt),
            LabField::Ggt => Some(&self.ggt),
            LabField::Triglycerides => Some(&self.triglycerides),
            LabField::Platelets => Some(&self.platelets),
            LabField::Albumin => Some(&self.albumin),
            LabField::Bmi => Some(&self.bmi),
            LabField::Weight => Some(&self.weight),
            LabField::Height => Some(&self.height),
            LabField::Waist => Some(&self.waist),
            LabField::UlnAst => Some(&self.uln_ast),
            _ => None,
        }
    }

    fn number_field_mut(&mut self, field: LabField) -> Option<&mut Field<f64>> {
        match field {
            LabField::Ast => Some(&mut self.ast),
            LabField::Alt => Some(&mut self.alt),
            LabField::Ggt => Some(&mut self.ggt),
            LabField::Triglycerides => Some(&mut self.triglycerides),
            LabField::Platelets => Some(&mut self.platelets),
            LabField::Albumin => Some(&mut self.albumin),
            LabField::Bmi => Some(&mut self.bmi),
            LabField::Weight => Some(&mut self.weight),
            LabField::Height => Some(&mut self.height),
            LabField::Waist => Some(&mut self.waist),
            LabField::UlnAst => Some(&mut self.uln_ast),
            _ => None,
        }
    }

    /// Writes `value` into `field`, honouring the user-entered precedence of
    /// `Field::apply`. Negative or non-finite numbers are rejected.
    pub fn set(
        &mut self,
        field: LabField,
        value: FieldValue,
        provenance: Provenance,
    ) -> Result<(), RecordError> {
        match (field, value) {
            (LabField::Name, FieldValue::Text(v)) => {
                self.name.apply(Field::with_provenance(v, provenance));
            }
            (LabField::Sex, FieldValue::Sex(v)) => {
                self.sex.apply(Field::with_provenance(v, provenance));
            }
            (LabField::Age, FieldValue::Integer(v)) => {
                self.age.apply(Field::with_provenance(v, provenance));
            }
            (LabField::Age, FieldValue::Number(v)) => {
                check_non_negative(field, v)?;
                self.age
                    .apply(Field::with_provenance(v.round() as u32, provenance));
            }
            (LabField::Diabetes, FieldValue::Flag(v)) => {
                self.diabetes.apply(Field::with_provenance(v, provenance));
            }
            (field, FieldValue::Number(v)) if field.is_numeric() => {
                check_non_negative(field, v)?;
                let slot = self
                    .number_field_mut(field)
                    .ok_or(RecordError::TypeMismatch { field })?;
                slot.apply(Field::with_provenance(v, provenance));
            }
            (field, _) => return Err(RecordError::TypeMismatch { field }),
        }
        Ok(())
    }

    /// Overlays `other` onto `self` field by field.
    pub fn merge(&mut self, other: LabRecord) {
        self.name.apply(other.name);
        self.sex.apply(other.sex);
        self.age.apply(other.age);
        self.ast.apply(other.ast);
        self.alt.apply(other.alt);
        self.ggt.apply(other.ggt);
        self.triglycerides.apply(other.triglycerides);
        self.platelets.apply(other.platelets);
        self.albumin.apply(other.albumin);
        self.bmi.apply(other.bmi);
        self.weight.apply(other.weight);
        self.height.apply(other.height);
        self.waist.apply(other.waist);
        self.uln_ast.apply(other.uln_ast);
        self.diabetes.apply(other.diabetes);
    }

    /// Fills BMI from weight (kg) and height (cm) when BMI itself is absent,
    /// or when it was only extracted and both weight and height were entered
    /// by the user. Returns true when a value was derived.
    pub fn derive_bmi(&mut self) -> bool {
        let user_inputs = self.weight.provenance == Provenance::UserEntered
            && self.height.provenance == Provenance::UserEntered;
        let replaceable = !self.bmi.is_present()
            || (user_inputs && self.bmi.provenance != Provenance::UserEntered);
        if !replaceable {
            return false;
        }
        let (Some(weight), Some(height)) = (self.weight.get(), self.height.get()) else {
            return false;
        };
        if height <= 0.0 {
            return false;
        }
        let meters = height / 100.0;
        let provenance = if user_inputs {
            Provenance::UserEntered
        } else {
            Provenance::Extracted
        };
        self.bmi = Field::with_provenance(weight / (meters * meters), provenance);
        true
    }
}

fn check_non_negative(field: LabField, value: f64) -> Result<(), RecordError> {
    if !value.is_finite() {
        return Err(RecordError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(RecordError::OutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;
