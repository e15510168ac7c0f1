use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::model::record::Sex;
use crate::model::thresholds::Units;

const PANEL: &str = indoc! {"
    Patient Name: Jane Doe
    Age: 56    Sex: Female
    AST (SGOT)      48 U/L      Ref. range 5 - 40
    ALT (SGPT)      36 U/L      7 - 56
    GGT             85 U/L
    Triglycerides   190 mg/dL
    Platelet Count  1,80,000 /cumm
    Albumin         4.1 g/dL
    BMI: 31.2 kg/m2
    Waist circumference: 102 cm
    Diabetes: No
"};

fn extract(text: &str) -> Stage1Output {
    run_stage1(text, &RuleSet::builtin().unwrap(), &Units::default())
}

#[test]
fn test_normalize_text() {
    assert_eq!(
        normalize_text("AST\t 40   U/L\r\nALT 30\rGGT\u{0c}TG"),
        "AST 40 U/L\nALT 30\nGGT\nTG"
    );
}

#[test]
fn test_full_panel() {
    let out = extract(PANEL);
    let r = &out.record;
    assert_eq!(r.name.value.as_deref(), Some("Jane Doe"));
    assert_eq!(r.sex(), Sex::Female);
    assert_eq!(r.age.get(), Some(56));
    assert_eq!(r.ast.get(), Some(48.0));
    assert_eq!(r.uln_ast.get(), Some(40.0));
    assert_eq!(r.alt.get(), Some(36.0));
    assert_eq!(r.ggt.get(), Some(85.0));
    assert_eq!(r.triglycerides.get(), Some(190.0));
    assert_eq!(r.platelets.get(), Some(180.0));
    assert_eq!(r.albumin.get(), Some(4.1));
    assert_eq!(r.bmi.get(), Some(31.2));
    assert_eq!(r.waist.get(), Some(102.0));
    assert_eq!(r.diabetes.get(), Some(false));
    assert_eq!(r.provenance(LabField::Ast), Provenance::Extracted);

    let not_found: Vec<_> = out
        .diagnostics
        .iter()
        .filter(|d| d.kind == MissKind::NotFound)
        .map(|d| d.field)
        .collect();
    assert_eq!(not_found, vec![LabField::Weight, LabField::Height]);
}

#[test]
fn test_range_expression_yields_uln_only() {
    let out = extract("AST (SGOT) 3 – 35 U/L");
    assert_eq!(out.record.uln_ast.get(), Some(35.0));
    assert!(!out.record.ast.is_present());
    assert!(out.diagnostics.iter().any(|d| d.field == LabField::Ast
        && matches!(&d.kind, MissKind::RangeBound { token } if token == "3")));
}

#[test]
fn test_value_on_next_line() {
    let text = indoc! {"
        Platelet Count
        250 10^3/µL
        SGOT
        45
    "};
    let out = extract(text);
    assert_eq!(out.record.platelets.get(), Some(250.0));
    assert_eq!(out.record.ast.get(), Some(45.0));
}

#[test]
fn test_thousands_separator() {
    let out = extract("Platelets 250,000 /µL");
    assert_eq!(out.record.platelets.get(), Some(250.0));
}

#[test]
fn test_invalid_number_leaves_field_absent() {
    let out = extract("Albumin 4,2 g/dL");
    assert!(!out.record.albumin.is_present());
    let miss = out
        .diagnostics
        .iter()
        .find(|d| d.field == LabField::Albumin && d.rule != "*")
        .unwrap();
    assert_eq!(
        miss.kind,
        MissKind::InvalidNumericFormat {
            token: "4,2".to_string()
        }
    );
}

#[test]
fn test_converted_units() {
    let text = indoc! {"
        Triglycerides 2.0 mmol/L
        Serum Albumin 41 g/L
        Weight: 176 lbs
        Height: 1.78 m
    "};
    let r = extract(text).record;
    assert!((r.triglycerides.get().unwrap() - 177.14).abs() < 1e-6);
    assert!((r.albumin.get().unwrap() - 4.1).abs() < 1e-9);
    assert!((r.weight.get().unwrap() - 79.83).abs() < 0.01);
    assert!((r.height.get().unwrap() - 178.0).abs() < 1e-9);
}

#[test]
fn test_empty_text_yields_empty_record() {
    let out = extract("");
    assert_eq!(out.record, LabRecord::default());
    assert_eq!(out.diagnostics.len(), LabField::ALL.len());
}

#[test]
fn test_platelet_column_header_unit() {
    let text = indoc! {"
        Test                          Result
        Platelet Count (10^3/uL)      250
        AST (U/L)                     41
    "};
    let out = extract(text);
    assert_eq!(out.record.platelets.get(), Some(250.0));
    assert_eq!(out.record.ast.get(), Some(41.0));
    assert!(out.diagnostics.iter().any(|d| d.field == LabField::Platelets
        && matches!(&d.kind, MissKind::UnitExponent { token } if token == "10")));
}

#[test]
fn test_configured_units_apply_to_unitless_values() {
    let units = Units {
        albumin: "g/L".to_string(),
        ..Units::default()
    };
    let text = "Albumin\n41\nTriglycerides\n150";
    let out = run_stage1(text, &RuleSet::builtin().unwrap(), &units);
    assert!((out.record.albumin.get().unwrap() - 4.1).abs() < 1e-9);
    assert_eq!(out.record.triglycerides.get(), Some(150.0));
}
