use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_user_entered_survives_later_extraction() {
    let mut field = Field::user(42.0);
    field.apply(Field::extracted(10.0));
    assert_eq!(field.get(), Some(42.0));
    assert_eq!(field.provenance, Provenance::UserEntered);
}

#[test]
fn test_user_entered_replaces_extracted() {
    let mut field = Field::extracted(10.0);
    field.apply(Field::user(42.0));
    assert_eq!(field.get(), Some(42.0));
    assert_eq!(field.provenance, Provenance::UserEntered);
}

#[test]
fn test_absent_write_is_ignored() {
    let mut field = Field::extracted(10.0);
    field.apply(Field::absent());
    assert_eq!(field.get(), Some(10.0));
}

#[test]
fn test_last_extracted_write_wins() {
    let mut field = Field::extracted(10.0);
    field.apply(Field::extracted(12.0));
    assert_eq!(field.get(), Some(12.0));
}

#[test]
fn test_set_rejects_negative() {
    let mut record = LabRecord::default();
    let err = record
        .set(LabField::Ast, FieldValue::Number(-1.0), Provenance::UserEntered)
        .unwrap_err();
    assert_eq!(
        err,
        RecordError::OutOfRange {
            field: LabField::Ast,
            value: -1.0
        }
    );
    assert!(!record.is_present(LabField::Ast));
}

#[test]
fn test_set_rejects_non_finite() {
    let mut record = LabRecord::default();
    let err = record
        .set(LabField::Alt, FieldValue::Number(f64::NAN), Provenance::Extracted)
        .unwrap_err();
    assert_eq!(err, RecordError::NonFinite { field: LabField::Alt });
}

#[test]
fn test_set_rejects_mismatched_type() {
    let mut record = LabRecord::default();
    let err = record
        .set(LabField::Name, FieldValue::Number(3.0), Provenance::Extracted)
        .unwrap_err();
    assert_eq!(err, RecordError::TypeMismatch { field: LabField::Name });
}

#[test]
fn test_age_from_number_is_rounded() {
    let mut record = LabRecord::default();
    record
        .set(LabField::Age, FieldValue::Number(45.6), Provenance::UserEntered)
        .unwrap();
    assert_eq!(record.age.get(), Some(46));
    assert_eq!(record.numeric(LabField::Age), Some(46.0));
}

#[test]
fn test_merge_keeps_extracted_where_user_is_silent() {
    let mut extracted = LabRecord::default();
    extracted.ast = Field::extracted(30.0);
    extracted.alt = Field::extracted(25.0);
    let mut user = LabRecord::default();
    user.alt = Field::user(40.0);

    extracted.merge(user);
    assert_eq!(extracted.ast.get(), Some(30.0));
    assert_eq!(extracted.provenance(LabField::Ast), Provenance::Extracted);
    assert_eq!(extracted.alt.get(), Some(40.0));
    assert_eq!(extracted.provenance(LabField::Alt), Provenance::UserEntered);
    assert_eq!(extracted.provenance(LabField::Ggt), Provenance::Absent);
}

#[test]
fn test_derive_bmi_from_weight_and_height() {
    let mut record = LabRecord::default();
    record.weight = Field::user(80.0);
    record.height = Field::extracted(180.0);
    assert!(record.derive_bmi());
    let bmi = record.bmi.get().unwrap();
    assert!((bmi - 24.691).abs() < 1e-3);
    assert_eq!(record.bmi.provenance, Provenance::Extracted);
}

#[test]
fn test_derive_bmi_keeps_existing_value() {
    let mut record = LabRecord::default();
    record.bmi = Field::user(31.0);
    record.weight = Field::user(80.0);
    record.height = Field::user(180.0);
    assert!(!record.derive_bmi());
    assert_eq!(record.bmi.get(), Some(31.0));
}

#[test]
fn test_derive_bmi_needs_both_inputs() {
    let mut record = LabRecord::default();
    record.weight = Field::user(80.0);
    assert!(!record.derive_bmi());
    assert!(!record.bmi.is_present());
}

#[test]
fn test_derive_bmi_replaces_extracted_when_inputs_user_entered() {
    let mut record = LabRecord::default();
    record.bmi = Field::extracted(31.2);
    record.weight = Field::user(80.0);
    record.height = Field::user(180.0);
    assert!(record.derive_bmi());
    assert!((record.bmi.get().unwrap() - 24.691).abs() < 1e-3);
    assert_eq!(record.bmi.provenance, Provenance::UserEntered);
}

#[test]
fn test_derive_bmi_keeps_extracted_when_inputs_extracted() {
    let mut record = LabRecord::default();
    record.bmi = Field::extracted(31.2);
    record.weight = Field::user(80.0);
    record.height = Field::extracted(180.0);
    assert!(!record.derive_bmi());
    assert_eq!(record.bmi.get(), Some(31.2));
    assert_eq!(record.bmi.provenance, Provenance::Extracted);
}

#[test]
fn test_sex_tokens() {
    assert_eq!(Sex::parse_token("M"), Some(Sex::Male));
    assert_eq!(Sex::parse_token(" female "), Some(Sex::Female));
    assert_eq!(Sex::parse_token("x"), None);
    assert_eq!(LabRecord::default().sex(), Sex::Unknown);
}

#[test]
fn test_field_keys_are_unique() {
    let mut keys: Vec<_> = LabField::ALL.iter().map(|f| f.key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), LabField::ALL.len());
}
