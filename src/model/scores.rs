use serde::Serialize;

use crate::model::bands::RiskBand;
use crate::model::record::LabField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreId {
    #[serde(rename = "FLI")]
    Fli,
    #[serde(rename = "FIB-4")]
    Fib4,
    #[serde(rename = "APRI")]
    Apri,
    #[serde(rename = "NFS")]
    Nfs,
}

impl ScoreId {
    pub fn name(self) -> &'static str {
        match self {
            ScoreId::Fli => "FLI",
            ScoreId::Fib4 => "FIB-4",
            ScoreId::Apri => "APRI",
            ScoreId::Nfs => "NFS",
        }
    }

    pub fn display_precision(self) -> usize {
        match self {
            ScoreId::Fli => 1,
            ScoreId::Fib4 | ScoreId::Apri | ScoreId::Nfs => 3,
        }
    }
}

impl std::fmt::Display for ScoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a score could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsufficientData {
    #[error("missing input: {field}")]
    MissingInput { field: LabField },
    #[error("{field} = {value} is outside the formula domain")]
    DomainError { field: LabField, value: f64 },
    #[error("diabetes status unknown")]
    DiabetesUnknown,
    #[error("formula produced a non-finite value")]
    NonFinite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub id: ScoreId,
    pub value: Option<f64>,
    pub band: RiskBand,
    pub reason_if_absent: Option<InsufficientData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ScoreResult {
    pub fn present(id: ScoreId, value: f64, band: RiskBand, notes: Vec<String>) -> Self {
        Self {
            id,
            value: Some(value),
            band,
            reason_if_absent: None,
            notes,
        }
    }

    pub fn absent(id: ScoreId, reason: InsufficientData) -> Self {
        Self {
            id,
            value: None,
            band: RiskBand::InsufficientData,
            reason_if_absent: Some(reason),
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscore {
    pub id: ScoreId,
    pub score_value: f64,
    pub subscore: f64,
    pub weight_used: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub value: Option<f64>,
    pub subscores: Vec<Subscore>,
    pub band: RiskBand,
}

impl CompositeResult {
    pub fn absent() -> Self {
        Self {
            value: None,
            subscores: Vec::new(),
            band: RiskBand::InsufficientData,
        }
    }
}
