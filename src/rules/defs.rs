use crate::model::record::LabField;

/// One candidate pattern for a field. Capture groups:
/// `value` (required unless the rule reads a range), `unit` (optional),
/// `range` (set when the value token is the lower end of a `lo - hi`
/// expression), and `lower`/`upper` for range rules.
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub field: LabField,
    pub name: &'static str,
    pub pattern: String,
}

pub const NUMBER: &str = r"\d+(?:,\d+)*(?:\.\d+)?";
const RANGE_TAIL: &str = r"(?P<range>[ \t]*[-–‐—][ \t]*\d)?";
const DASH: &str = r"[ \t]*[-–‐—][ \t]*";
const NAME_VALUE: &str = r"(?P<value>[A-Za-z][A-Za-z .'\-]{1,60}?)";
const NAME_STOP: &str =
    r"(?:[ \t]+(?:barcode|patient[ \t]*id|id|age|sex|gender|dob)\b|[ \t]*\d|[ \t]*$)";
const SEX_VALUE: &str = r"(?P<value>Male|Female|M|F)\b";

const AST_LABEL: &str = r"\b(?:AST|SGOT|Aspartate[ \t]*(?:amino)?transferase)\b";
const ALT_LABEL: &str = r"\b(?:ALT|SGPT|Alanine[ \t]*(?:amino)?transferase)\b";
const GGT_LABEL: &str =
    r"\b(?:GGT|GGTP|Gamma[\- \t]*GT|Gamma[\- \t]*glutamyl[\- \t]*transferase)\b";
const TG_LABEL: &str = r"\b(?:Triglycerides?|TG)\b";
const PLATELET_LABEL: &str = r"\b(?:Platelets?(?:[ \t]*count)?|PLT)\b";
const ALBUMIN_LABEL: &str = r"\b(?:Serum[ \t]*)?Albumin\b";
const BMI_LABEL: &str = r"\b(?:BMI|Body[ \t]*Mass[ \t]*Index)\b";
const WEIGHT_LABEL: &str = r"\b(?:Body[ \t]*)?(?:Weight|Wt)\b";
const HEIGHT_LABEL: &str = r"\b(?:Height|Ht)\b";
const WAIST_LABEL: &str = r"\b(?:Waist(?:[ \t]*circumference)?|WC)\b";
const DIABETES_LABEL: &str =
    r"\b(?:Diabetes(?:[ \t]*Mellitus)?(?:[ \t]*/[ \t]*IFG)?|Diabetic|IFG)\b";

const ENZYME_UNIT: &str = r"(?P<unit>IU/?L|U/?L)\b";
const TG_UNIT: &str = r"(?P<unit>mg/?dL|mmol/?L)\b";
const PLATELET_UNIT: &str = r"(?P<unit>(?:x[ \t]*)?10[ \t]*\^?[ \t]*9[ \t]*/[ \t]*L|(?:x[ \t]*)?10[ \t]*\^?[ \t]*3[ \t]*/[ \t]*(?:µL|uL|mm3|cumm)|(?:x[ \t]*)?10[³⁹][ \t]*/[ \t]*(?:µL|uL|L)|K[ \t]*/[ \t]*(?:µL|uL)|lakhs?[ \t]*/[ \t]*(?:cumm|mm3|µL|uL)|/[ \t]*(?:µL|uL|cumm|mm3))";
const ALBUMIN_UNIT: &str = r"\b(?P<unit>g[ \t]*/[ \t]*dL|g[ \t]*/[ \t]*L)\b";
const BMI_UNIT: &str = r"(?P<unit>kg[ \t]*/[ \t]*m(?:2|²|\^2))";
const WEIGHT_UNIT: &str = r"(?P<unit>kgs?|lbs?)\b";
const HEIGHT_UNIT: &str = r"(?P<unit>cm|m)\b";
const WAIST_UNIT: &str = r"(?P<unit>cm|in|inch(?:es)?)\b";

fn value_then_unit(label: &str, unit: &str) -> String {
    format!(r"(?i){label}[^\n]{{0,80}}?\b(?P<value>{NUMBER}){RANGE_TAIL}[^\n]{{0,30}}?{unit}")
}

fn tight_value_unit(label: &str, unit: &str) -> String {
    format!(r"(?i){label}[^\n]{{0,40}}?\b(?P<value>{NUMBER}){RANGE_TAIL}[ \t]*{unit}")
}

fn unit_then_value(label: &str, unit: &str) -> String {
    format!(
        r"(?i){label}[ \t]*\(?[ \t]*{unit}[ \t]*\)?[^\n\d]{{0,20}}\b(?P<value>{NUMBER}){RANGE_TAIL}"
    )
}

fn next_line(label: &str, unit: &str) -> String {
    format!(
        r"(?i){label}[^\n\d]{{0,40}}\n[ \t]*(?P<value>{NUMBER}){RANGE_TAIL}(?:[ \t]*{unit})?"
    )
}

fn labelled(label: &str, unit: &str) -> String {
    format!(
        r"(?i){label}[ \t]*(?:\([^)\n]{{0,12}}\))?[ \t]*[:=\-]?[ \t]*\b(?P<value>{NUMBER}){RANGE_TAIL}(?:[ \t]*{unit})?"
    )
}

fn lab_rules(field: LabField, label: &str, unit: &str) -> Vec<RuleDef> {
    vec![
        RuleDef {
            field,
            name: "value-unit",
            pattern: value_then_unit(label, unit),
        },
        RuleDef {
            field,
            name: "unit-value",
            pattern: unit_then_value(label, unit),
        },
        RuleDef {
            field,
            name: "next-line",
            pattern: next_line(label, unit),
        },
    ]
}

fn anthropometric_rules(field: LabField, label: &str, unit: &str) -> Vec<RuleDef> {
    vec![
        RuleDef {
            field,
            name: "value-unit",
            pattern: tight_value_unit(label, unit),
        },
        RuleDef {
            field,
            name: "labelled",
            pattern: labelled(label, unit),
        },
    ]
}

/// Ordered candidates for the upper limit of normal of AST. All of them
/// capture both ends of a `lo - hi` interval; the caller keeps the upper.
fn uln_ast_rules() -> Vec<RuleDef> {
    let bound = r"\d{1,3}(?:\.\d+)?";
    vec![
        RuleDef {
            field: LabField::UlnAst,
            name: "reference-interval",
            pattern: format!(
                r"(?i){AST_LABEL}[^\n]*?(?:ref(?:erence)?\.?[ \t]*(?:range|interval)|bio\.?[ \t]*ref[^\n]*?|range)[^\n]*?\b(?P<lower>{bound}){DASH}(?P<upper>{bound})\b"
            ),
        },
        RuleDef {
            field: LabField::UlnAst,
            name: "unit-then-interval",
            pattern: format!(
                r"(?i){AST_LABEL}[^\n]*?(?:IU/?L|U/?L)\b[^\n]*?\b(?P<lower>{bound}){DASH}(?P<upper>{bound})\b"
            ),
        },
        RuleDef {
            field: LabField::UlnAst,
            name: "bare-interval",
            pattern: format!(
                r"(?i){AST_LABEL}[^\n]*?\b(?P<lower>{bound}){DASH}(?P<upper>{bound})\b"
            ),
        },
    ]
}

fn demographic_rules() -> Vec<RuleDef> {
    vec![
        RuleDef {
            field: LabField::Name,
            name: "patient-name",
            pattern: format!(r"(?im)\bPatient[ \t]*Name[ \t]*[:\-][ \t]*{NAME_VALUE}{NAME_STOP}"),
        },
        RuleDef {
            field: LabField::Name,
            name: "name",
            pattern: format!(r"(?im)\bName[ \t]*[:\-][ \t]*{NAME_VALUE}{NAME_STOP}"),
        },
        RuleDef {
            field: LabField::Name,
            name: "name-loose",
            pattern: format!(r"(?im)\b(?:Patient[ \t]*Name|Name)\b[^\n]{{0,20}}?{NAME_VALUE}{NAME_STOP}"),
        },
        RuleDef {
            field: LabField::Sex,
            name: "sex",
            pattern: format!(r"(?i)\b(?:Sex|Gender)[ \t]*[:\-][ \t]*{SEX_VALUE}"),
        },
        RuleDef {
            field: LabField::Sex,
            name: "age-sex",
            pattern: format!(
                r"(?i)\bAge[ \t]*/[ \t]*(?:Sex|Gender)[ \t]*[:\-]?[ \t]*\d{{1,3}}[^\n/]{{0,8}}/[ \t]*{SEX_VALUE}"
            ),
        },
        RuleDef {
            field: LabField::Sex,
            name: "sex-loose",
            pattern: format!(r"(?i)\b(?:Sex|Gender)\b[^\n]{{0,20}}?\b{SEX_VALUE}"),
        },
        RuleDef {
            field: LabField::Age,
            name: "age",
            pattern: r"(?i)\bAge[ \t]*[:\-][ \t]*(?P<value>\d{1,3})\b".to_string(),
        },
        RuleDef {
            field: LabField::Age,
            name: "age-sex",
            pattern: r"(?i)\bAge[ \t]*/[ \t]*(?:Sex|Gender)[ \t]*[:\-]?[ \t]*(?P<value>\d{1,3})\b"
                .to_string(),
        },
        RuleDef {
            field: LabField::Age,
            name: "age-loose",
            pattern: r"(?i)\bAge\b[^\d\n]{0,20}(?P<value>\d{1,3})\b".to_string(),
        },
        RuleDef {
            field: LabField::Diabetes,
            name: "diabetes",
            pattern: format!(
                r"(?i){DIABETES_LABEL}[ \t]*(?:status)?[ \t]*[:\-][ \t]*(?P<value>Yes|No|Y|N|Present|Absent|Positive|Negative)\b"
            ),
        },
    ]
}

/// Field order is the extraction order; rule order within a field is
/// priority order.
pub fn builtin_rules() -> Vec<RuleDef> {
    let mut rules = demographic_rules();
    rules.extend(lab_rules(LabField::Ast, AST_LABEL, ENZYME_UNIT));
    rules.extend(lab_rules(LabField::Alt, ALT_LABEL, ENZYME_UNIT));
    rules.extend(lab_rules(LabField::Ggt, GGT_LABEL, ENZYME_UNIT));
    rules.extend(lab_rules(LabField::Triglycerides, TG_LABEL, TG_UNIT));
    rules.extend(lab_rules(LabField::Platelets, PLATELET_LABEL, PLATELET_UNIT));
    rules.extend(lab_rules(LabField::Albumin, ALBUMIN_LABEL, ALBUMIN_UNIT));
    rules.extend(anthropometric_rules(LabField::Bmi, BMI_LABEL, BMI_UNIT));
    rules.extend(anthropometric_rules(LabField::Weight, WEIGHT_LABEL, WEIGHT_UNIT));
    rules.extend(anthropometric_rules(LabField::Height, HEIGHT_LABEL, HEIGHT_UNIT));
    rules.extend(anthropometric_rules(LabField::Waist, WAIST_LABEL, WAIST_UNIT));
    rules.extend(uln_ast_rules());
    rules
}
