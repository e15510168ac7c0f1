use crate::model::record::LabField;
use crate::model::thresholds::{ProfileError, Units};

const TG_MMOL_TO_MGDL: f64 = 88.57;
const LB_TO_KG: f64 = 0.453_592_37;
const INCH_TO_CM: f64 = 2.54;

/// Converts a captured value into the canonical unit of its field: U/L,
/// 10^9/L, g/dL, mg/dL, kg/m2, kg and cm. A value captured without a unit
/// is read in the profile's assumed unit for that field.
pub fn normalize_unit(field: LabField, value: f64, unit: Option<&str>, assumed: &Units) -> f64 {
    let unit = unit.or_else(|| assumed.for_field(field)).map(compact);
    let unit = unit.as_deref();
    match field {
        LabField::Triglycerides => match unit {
            Some(u) if u.starts_with("mmol") => value * TG_MMOL_TO_MGDL,
            _ => value,
        },
        LabField::Platelets => match unit {
            Some(u) if u.starts_with("lakh") => value * 100.0,
            Some(u) if u.starts_with('/') => value / 1000.0,
            _ => value,
        },
        LabField::Albumin => match unit {
            Some("g/l") => value / 10.0,
            _ => value,
        },
        LabField::Weight => match unit {
            Some(u) if u.starts_with("lb") => value * LB_TO_KG,
            _ => value,
        },
        LabField::Height => match unit {
            Some("m") => value * 100.0,
            None if value < 3.0 => value * 100.0,
            _ => value,
        },
        LabField::Waist => match unit {
            Some(u) if u.starts_with("in") => value * INCH_TO_CM,
            _ => value,
        },
        _ => value,
    }
}

/// Whether `normalize_unit` knows how to read `unit` for `field`.
pub fn is_supported(field: LabField, unit: &str) -> bool {
    let u = compact(unit);
    match field {
        LabField::Ast | LabField::Alt | LabField::Ggt | LabField::UlnAst => {
            matches!(u.as_str(), "u/l" | "iu/l")
        }
        LabField::Triglycerides => matches!(u.as_str(), "mg/dl" | "mmol/l"),
        LabField::Platelets => {
            u.starts_with("lakh")
                || u.starts_with('/')
                || matches!(
                    u.trim_start_matches('x'),
                    "10^9/l" | "10^3/ul" | "10^3/µl" | "10^3/mm3" | "k/ul" | "k/µl"
                )
        }
        LabField::Albumin => matches!(u.as_str(), "g/dl" | "g/l"),
        LabField::Bmi => matches!(u.as_str(), "kg/m2" | "kg/m²"),
        LabField::Waist => matches!(u.as_str(), "cm" | "in" | "inch" | "inches"),
        _ => false,
    }
}

pub fn check_units(units: &Units) -> Result<(), ProfileError> {
    let configured = [
        (LabField::Ast, "enzymes", &units.enzymes),
        (LabField::Platelets, "platelets", &units.platelets),
        (LabField::Albumin, "albumin", &units.albumin),
        (LabField::Triglycerides, "triglycerides", &units.triglycerides),
        (LabField::Bmi, "bmi", &units.bmi),
        (LabField::Waist, "waist", &units.waist),
    ];
    for (field, key, unit) in configured {
        if !is_supported(field, unit) {
            return Err(ProfileError::UnsupportedUnit {
                key,
                unit: unit.clone(),
            });
        }
    }
    Ok(())
}

fn compact(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/rules/units.rs"]
mod tests;
