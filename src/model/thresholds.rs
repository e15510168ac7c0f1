use serde::{Deserialize, Serialize};

use crate::model::bands::{BandCutoffs, SubscoreAnchors};
use crate::model::record::LabField;
use crate::model::scores::ScoreId;

// Bedogni 2006: FLI < 30 rules out, >= 60 rules in hepatic steatosis.
pub const FLI_LOW_BELOW: f64 = 30.0;
pub const FLI_HIGH_FROM: f64 = 60.0;
// Shah 2009 NAFLD cutoffs for the Sterling 2006 index.
pub const FIB4_LOW_BELOW: f64 = 1.30;
pub const FIB4_HIGH_ABOVE: f64 = 2.67;
// Wai 2003, significant fibrosis.
pub const APRI_LOW_AT_OR_BELOW: f64 = 0.5;
pub const APRI_HIGH_ABOVE: f64 = 1.5;
// Angulo 2007.
pub const NFS_LOW_BELOW: f64 = -1.455;
pub const NFS_HIGH_ABOVE: f64 = 0.676;

pub const COMPOSITE_LOW_BELOW: f64 = 100.0 / 3.0;
pub const COMPOSITE_HIGH_ABOVE: f64 = 200.0 / 3.0;

pub const FIB4_ANCHORS: SubscoreAnchors = SubscoreAnchors::new(0.0, 4.0);
pub const APRI_ANCHORS: SubscoreAnchors = SubscoreAnchors::new(0.0, 2.0);
pub const NFS_ANCHORS: SubscoreAnchors = SubscoreAnchors::new(-3.5, 2.5);

pub const FIB4_WEIGHT: f64 = 0.40;
pub const APRI_WEIGHT: f64 = 0.30;
pub const NFS_WEIGHT: f64 = 0.30;

const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Units {
    pub enzymes: String,
    pub platelets: String,
    pub albumin: String,
    pub triglycerides: String,
    pub bmi: String,
    pub waist: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            enzymes: "U/L".to_string(),
            platelets: "10^9/L".to_string(),
            albumin: "g/dL".to_string(),
            triglycerides: "mg/dL".to_string(),
            bmi: "kg/m2".to_string(),
            waist: "cm".to_string(),
        }
    }
}

impl Units {
    /// Unit a bare number is read in when the text names none. Weight and
    /// height have no assumed unit; height falls back to a metres/centimetres
    /// guess instead.
    pub fn for_field(&self, field: LabField) -> Option<&str> {
        match field {
            LabField::Ast | LabField::Alt | LabField::Ggt | LabField::UlnAst => {
                Some(&self.enzymes)
            }
            LabField::Platelets => Some(&self.platelets),
            LabField::Albumin => Some(&self.albumin),
            LabField::Triglycerides => Some(&self.triglycerides),
            LabField::Bmi => Some(&self.bmi),
            LabField::Waist => Some(&self.waist),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    pub fib4: f64,
    pub apri: f64,
    pub nfs: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            fib4: FIB4_WEIGHT,
            apri: APRI_WEIGHT,
            nfs: NFS_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{name} weight must be between 0.0 and 1.0, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("composite weights must sum to 1.0, but sum to {0:.3}")]
    WeightSum(f64),
    #[error("{0} cutoffs must satisfy low <= high")]
    UnorderedCutoffs(&'static str),
    #[error("{0} anchors must satisfy floor <= low cutoff <= high cutoff <= ceiling")]
    UnorderedAnchors(&'static str),
    #[error("unsupported {key} unit `{unit}`")]
    UnsupportedUnit { key: &'static str, unit: String },
}

/// Every tunable number the scorer uses. Built once and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub units: Units,
    pub fli: BandCutoffs,
    pub fib4: BandCutoffs,
    pub apri: BandCutoffs,
    pub nfs: BandCutoffs,
    pub composite: BandCutoffs,
    pub fib4_anchors: SubscoreAnchors,
    pub apri_anchors: SubscoreAnchors,
    pub nfs_anchors: SubscoreAnchors,
    pub weights: CompositeWeights,
    pub assume_no_diabetes_when_absent: bool,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            units: Units::default(),
            fli: BandCutoffs::new(FLI_LOW_BELOW, false, FLI_HIGH_FROM, true),
            fib4: BandCutoffs::new(FIB4_LOW_BELOW, false, FIB4_HIGH_ABOVE, false),
            apri: BandCutoffs::new(APRI_LOW_AT_OR_BELOW, true, APRI_HIGH_ABOVE, false),
            nfs: BandCutoffs::new(NFS_LOW_BELOW, false, NFS_HIGH_ABOVE, false),
            composite: BandCutoffs::new(COMPOSITE_LOW_BELOW, false, COMPOSITE_HIGH_ABOVE, false),
            fib4_anchors: FIB4_ANCHORS,
            apri_anchors: APRI_ANCHORS,
            nfs_anchors: NFS_ANCHORS,
            weights: CompositeWeights::default(),
            assume_no_diabetes_when_absent: true,
        }
    }

    pub fn cutoffs(&self, id: ScoreId) -> &BandCutoffs {
        match id {
            ScoreId::Fli => &self.fli,
            ScoreId::Fib4 => &self.fib4,
            ScoreId::Apri => &self.apri,
            ScoreId::Nfs => &self.nfs,
        }
    }

    /// Anchors exist only for scores that feed the composite.
    pub fn anchors(&self, id: ScoreId) -> Option<&SubscoreAnchors> {
        match id {
            ScoreId::Fli => None,
            ScoreId::Fib4 => Some(&self.fib4_anchors),
            ScoreId::Apri => Some(&self.apri_anchors),
            ScoreId::Nfs => Some(&self.nfs_anchors),
        }
    }

    pub fn weight(&self, id: ScoreId) -> Option<f64> {
        match id {
            ScoreId::Fli => None,
            ScoreId::Fib4 => Some(self.weights.fib4),
            ScoreId::Apri => Some(self.weights.apri),
            ScoreId::Nfs => Some(self.weights.nfs),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let weights = [
            ("FIB-4", self.weights.fib4),
            ("APRI", self.weights.apri),
            ("NFS", self.weights.nfs),
        ];
        for (name, value) in weights {
            if !(0.0..=1.0).contains(&value) {
                return Err(ProfileError::InvalidWeight { name, value });
            }
        }
        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ProfileError::WeightSum(sum));
        }

        let cutoffs = [
            ("FLI", &self.fli),
            ("FIB-4", &self.fib4),
            ("APRI", &self.apri),
            ("NFS", &self.nfs),
            ("composite", &self.composite),
        ];
        for (name, c) in cutoffs {
            if !c.is_ordered() {
                return Err(ProfileError::UnorderedCutoffs(name));
            }
        }

        let anchors = [
            ("FIB-4", &self.fib4_anchors, &self.fib4),
            ("APRI", &self.apri_anchors, &self.apri),
            ("NFS", &self.nfs_anchors, &self.nfs),
        ];
        for (name, a, c) in anchors {
            if !a.is_ordered_around(c) {
                return Err(ProfileError::UnorderedAnchors(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
