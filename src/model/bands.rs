use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Indeterminate,
    High,
    InsufficientData,
}

impl RiskBand {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Indeterminate => "indeterminate",
            RiskBand::High => "high",
            RiskBand::InsufficientData => "insufficient_data",
        }
    }
}

/// Two cutoffs split a score into low / indeterminate / high. The inclusive
/// flags say whether a value sitting exactly on a cutoff belongs to the
/// outer band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandCutoffs {
    pub low: f64,
    #[serde(default)]
    pub low_inclusive: bool,
    pub high: f64,
    #[serde(default)]
    pub high_inclusive: bool,
}

impl BandCutoffs {
    pub const fn new(low: f64, low_inclusive: bool, high: f64, high_inclusive: bool) -> Self {
        Self {
            low,
            low_inclusive,
            high,
            high_inclusive,
        }
    }

    pub fn classify(&self, value: f64) -> RiskBand {
        if !value.is_finite() {
            return RiskBand::InsufficientData;
        }
        if value < self.low || (self.low_inclusive && value == self.low) {
            RiskBand::Low
        } else if value > self.high || (self.high_inclusive && value == self.high) {
            RiskBand::High
        } else {
            RiskBand::Indeterminate
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }
}

/// Outer edges of the subscore ramp. Values beyond them saturate at 0 or 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubscoreAnchors {
    pub floor: f64,
    pub ceiling: f64,
}

impl SubscoreAnchors {
    pub const fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn is_ordered_around(&self, cutoffs: &BandCutoffs) -> bool {
        self.floor <= cutoffs.low && cutoffs.high <= self.ceiling
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bands.rs"]
mod tests;
