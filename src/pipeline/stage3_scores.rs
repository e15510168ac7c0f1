use tracing::info;

use crate::model::bands::RiskBand;
use crate::model::interpretation::{Interpretation, Metric, lookup};
use crate::model::record::{LabField, LabRecord};
use crate::model::scores::{InsufficientData, ScoreId, ScoreResult};
use crate::model::thresholds::ScoringProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedScore {
    pub value: f64,
    pub notes: Vec<String>,
}

impl ComputedScore {
    fn plain(value: f64) -> Self {
        Self {
            value,
            notes: Vec::new(),
        }
    }
}

/// A scoring formula: what it is, what it reads, how it computes and how its
/// bands read.
pub trait ScoreModule: Sync {
    fn id(&self) -> ScoreId;

    fn required_inputs(&self) -> &'static [LabField];

    fn compute(
        &self,
        record: &LabRecord,
        profile: &ScoringProfile,
    ) -> Result<ComputedScore, InsufficientData>;

    fn interpret(&self, band: RiskBand) -> Interpretation {
        lookup(Metric::Score(self.id()), band)
    }
}

pub struct Fli;
pub struct Fib4;
pub struct Apri;
pub struct Nfs;

pub static SCORE_MODULES: [&dyn ScoreModule; 4] = [&Fli, &Fib4, &Apri, &Nfs];

fn require(record: &LabRecord, field: LabField) -> Result<f64, InsufficientData> {
    record
        .numeric(field)
        .ok_or(InsufficientData::MissingInput { field })
}

fn require_all(record: &LabRecord, fields: &[LabField]) -> Result<(), InsufficientData> {
    for &field in fields {
        let present = if field == LabField::Diabetes {
            true
        } else {
            record.is_present(field)
        };
        if !present {
            return Err(InsufficientData::MissingInput { field });
        }
    }
    Ok(())
}

fn positive(field: LabField, value: f64) -> Result<f64, InsufficientData> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InsufficientData::DomainError { field, value })
    }
}

fn logistic_percent(linear: f64) -> f64 {
    let p = if linear >= 0.0 {
        1.0 / (1.0 + (-linear).exp())
    } else {
        let e = linear.exp();
        e / (1.0 + e)
    };
    (100.0 * p).clamp(0.0, 100.0)
}

impl ScoreModule for Fli {
    fn id(&self) -> ScoreId {
        ScoreId::Fli
    }

    fn required_inputs(&self) -> &'static [LabField] {
        &[
            LabField::Triglycerides,
            LabField::Bmi,
            LabField::Ggt,
            LabField::Waist,
        ]
    }

    fn compute(
        &self,
        record: &LabRecord,
        _profile: &ScoringProfile,
    ) -> Result<ComputedScore, InsufficientData> {
        require_all(record, self.required_inputs())?;
        let tg = positive(LabField::Triglycerides, require(record, LabField::Triglycerides)?)?;
        let ggt = positive(LabField::Ggt, require(record, LabField::Ggt)?)?;
        let bmi = require(record, LabField::Bmi)?;
        let waist = require(record, LabField::Waist)?;

        let linear = 0.953 * tg.ln() + 0.139 * bmi + 0.718 * ggt.ln() + 0.053 * waist - 15.745;
        Ok(ComputedScore::plain(logistic_percent(linear)))
    }
}

impl ScoreModule for Fib4 {
    fn id(&self) -> ScoreId {
        ScoreId::Fib4
    }

    fn required_inputs(&self) -> &'static [LabField] {
        &[
            LabField::Age,
            LabField::Ast,
            LabField::Alt,
            LabField::Platelets,
        ]
    }

    fn compute(
        &self,
        record: &LabRecord,
        _profile: &ScoringProfile,
    ) -> Result<ComputedScore, InsufficientData> {
        require_all(record, self.required_inputs())?;
        let age = require(record, LabField::Age)?;
        let ast = require(record, LabField::Ast)?;
        let platelets = positive(LabField::Platelets, require(record, LabField::Platelets)?)?;
        let alt = positive(LabField::Alt, require(record, LabField::Alt)?)?;

        Ok(ComputedScore::plain((age * ast) / (platelets * alt.sqrt())))
    }
}

impl ScoreModule for Apri {
    fn id(&self) -> ScoreId {
        ScoreId::Apri
    }

    fn required_inputs(&self) -> &'static [LabField] {
        &[LabField::Ast, LabField::UlnAst, LabField::Platelets]
    }

    fn compute(
        &self,
        record: &LabRecord,
        _profile: &ScoringProfile,
    ) -> Result<ComputedScore, InsufficientData> {
        require_all(record, self.required_inputs())?;
        let ast = require(record, LabField::Ast)?;
        let uln = positive(LabField::UlnAst, require(record, LabField::UlnAst)?)?;
        let platelets = positive(LabField::Platelets, require(record, LabField::Platelets)?)?;

        Ok(ComputedScore::plain((ast / uln) * 100.0 / platelets))
    }
}

impl ScoreModule for Nfs {
    fn id(&self) -> ScoreId {
        ScoreId::Nfs
    }

    fn required_inputs(&self) -> &'static [LabField] {
        &[
            LabField::Age,
            LabField::Bmi,
            LabField::Diabetes,
            LabField::Ast,
            LabField::Alt,
            LabField::Platelets,
            LabField::Albumin,
        ]
    }

    fn compute(
        &self,
        record: &LabRecord,
        profile: &ScoringProfile,
    ) -> Result<ComputedScore, InsufficientData> {
        require_all(record, self.required_inputs())?;
        let age = require(record, LabField::Age)?;
        let bmi = require(record, LabField::Bmi)?;
        let ast = require(record, LabField::Ast)?;
        let alt = positive(LabField::Alt, require(record, LabField::Alt)?)?;
        let platelets = require(record, LabField::Platelets)?;
        let albumin = require(record, LabField::Albumin)?;

        let mut notes = Vec::new();
        let diabetes = match record.diabetes.get() {
            Some(flag) => flag,
            None if profile.assume_no_diabetes_when_absent => {
                notes.push("diabetes/IFG status not provided; assumed absent".to_string());
                false
            }
            None => return Err(InsufficientData::DiabetesUnknown),
        };
        let diabetes = if diabetes { 1.0 } else { 0.0 };

        let value = -1.675 + 0.037 * age + 0.094 * bmi + 1.13 * diabetes + 0.99 * (ast / alt)
            - 0.013 * platelets
            - 0.66 * albumin;
        Ok(ComputedScore { value, notes })
    }
}

/// Evaluates every registered module independently, in registry order.
pub fn run_stage3(record: &LabRecord, profile: &ScoringProfile) -> Vec<ScoreResult> {
    SCORE_MODULES
        .iter()
        .map(|module| evaluate(*module, record, profile))
        .collect()
}

pub fn evaluate(
    module: &dyn ScoreModule,
    record: &LabRecord,
    profile: &ScoringProfile,
) -> ScoreResult {
    let id = module.id();
    match module.compute(record, profile) {
        Ok(computed) if computed.value.is_finite() => {
            let band = profile.cutoffs(id).classify(computed.value);
            ScoreResult::present(id, computed.value, band, computed.notes)
        }
        Ok(_) => {
            info!(score = %id, "insufficient data: non-finite result");
            ScoreResult::absent(id, InsufficientData::NonFinite)
        }
        Err(reason) => {
            info!(score = %id, "insufficient data: {reason}");
            ScoreResult::absent(id, reason)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_scores.rs"]
mod tests;
