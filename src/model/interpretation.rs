use serde::Serialize;

use crate::model::bands::RiskBand;
use crate::model::scores::ScoreId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Score(ScoreId),
    Composite,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Score(id) => id.name(),
            Metric::Composite => "Liver Health Index (0-100)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub band: RiskBand,
    pub label: &'static str,
    pub guidance: &'static str,
}

struct InterpretationDef {
    metric: Metric,
    band: RiskBand,
    label: &'static str,
    guidance: &'static str,
}

const INSUFFICIENT: Interpretation = Interpretation {
    band: RiskBand::InsufficientData,
    label: "Insufficient data",
    guidance: "Required inputs are missing or invalid; not computed.",
};

const INTERPRETATIONS: &[InterpretationDef] = &[
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fli),
        band: RiskBand::Low,
        label: "Low (fatty liver unlikely)",
        guidance: "Maintain lifestyle; monitor.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fli),
        band: RiskBand::Indeterminate,
        label: "Intermediate",
        guidance: "Consider ultrasound or repeat after optimisation.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fli),
        band: RiskBand::High,
        label: "High (fatty liver likely)",
        guidance: "Proceed to fibrosis staging (NFS, FIB-4, APRI).",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fib4),
        band: RiskBand::Low,
        label: "Low",
        guidance: "Advanced fibrosis ruled out.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fib4),
        band: RiskBand::Indeterminate,
        label: "Indeterminate",
        guidance: "Consider elastography (FibroScan).",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Fib4),
        band: RiskBand::High,
        label: "High",
        guidance: "Advanced fibrosis likely; hepatology referral.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Apri),
        band: RiskBand::Low,
        label: "Low",
        guidance: "Significant fibrosis unlikely.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Apri),
        band: RiskBand::Indeterminate,
        label: "Indeterminate",
        guidance: "Consider elastography or repeat testing.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Apri),
        band: RiskBand::High,
        label: "High",
        guidance: "Significant fibrosis likely; specialist referral.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Nfs),
        band: RiskBand::Low,
        label: "Low",
        guidance: "Advanced fibrosis unlikely.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Nfs),
        band: RiskBand::Indeterminate,
        label: "Indeterminate",
        guidance: "Consider elastography or specialist assessment.",
    },
    InterpretationDef {
        metric: Metric::Score(ScoreId::Nfs),
        band: RiskBand::High,
        label: "High",
        guidance: "Advanced fibrosis likely; specialist referral.",
    },
    InterpretationDef {
        metric: Metric::Composite,
        band: RiskBand::Low,
        label: "Low risk",
        guidance: "Low probability of advanced fibrosis; routine monitoring.",
    },
    InterpretationDef {
        metric: Metric::Composite,
        band: RiskBand::Indeterminate,
        label: "Moderate risk",
        guidance: "Indeterminate; consider elastography (FibroScan).",
    },
    InterpretationDef {
        metric: Metric::Composite,
        band: RiskBand::High,
        label: "High risk",
        guidance: "High probability; hepatology referral, imaging and workup.",
    },
];

pub fn lookup(metric: Metric, band: RiskBand) -> Interpretation {
    INTERPRETATIONS
        .iter()
        .find(|def| def.metric == metric && def.band == band)
        .map(|def| Interpretation {
            band: def.band,
            label: def.label,
            guidance: def.guidance,
        })
        .unwrap_or(INSUFFICIENT)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/interpretation.rs"]
mod tests;
