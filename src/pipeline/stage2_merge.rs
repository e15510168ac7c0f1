use tracing::info;

use crate::input::overrides::{RejectedOverride, UserOverrides};
use crate::model::record::LabRecord;

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub record: LabRecord,
    pub bmi_derived: bool,
    pub rejected: Vec<RejectedOverride>,
}

/// Lays user overrides over the extracted record and derives BMI when it
/// can. Overrides that fail validation are dropped one field at a time and
/// returned alongside the record.
pub fn run_stage2(extracted: LabRecord, overrides: &UserOverrides) -> Stage2Output {
    let mut record = extracted;
    let mut rejected = Vec::new();
    if !overrides.is_empty() {
        let (user, dropped) = overrides.to_record();
        record.merge(user);
        rejected = dropped;
    }
    let bmi_derived = record.derive_bmi();
    if bmi_derived {
        info!(
            bmi = record.bmi.get().unwrap_or_default(),
            "BMI derived from weight and height"
        );
    }
    Stage2Output {
        record,
        bmi_derived,
        rejected,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_merge.rs"]
mod tests;
