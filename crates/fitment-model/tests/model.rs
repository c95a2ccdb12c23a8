//! Tests for fitment-model types.

use fitment_model::{
    PartFitment, Position, PositionAxis, PositionGroup, ValidationResult, ValidationStatus,
    ValidationSummary, Vehicle,
};

#[test]
fn failed_result_snapshot() {
    let result = ValidationResult::failed("No year range found", "Honda Accord");
    insta::assert_json_snapshot!(result, @r#"
    {
      "status": "ERROR",
      "message": "No year range found",
      "fitment": null,
      "original_text": "Honda Accord",
      "suggestions": []
    }
    "#);
}

#[test]
fn result_with_null_fitment_round_trips() {
    let result = ValidationResult::failed("Invalid year range", "2010-2005 Honda Accord");
    let json = serde_json::to_value(&result).expect("serialize result");
    assert!(json["fitment"].is_null());
    let round: ValidationResult = serde_json::from_value(json).expect("deserialize result");
    assert_eq!(round, result);
}

#[test]
fn positions_serialize_with_catalog_labels() {
    let group = PositionGroup::default()
        .with(PositionAxis::FrontRear, Position::VariesWithApplication)
        .with(PositionAxis::LeftRight, Position::Left);
    let json = serde_json::to_value(group).expect("serialize group");
    assert_eq!(json["front_rear"], "Varies with Application");
    assert_eq!(json["left_right"], "Left");
    assert_eq!(json["upper_lower"], "N/A");
}

#[test]
fn enriched_fitment_serializes_ids() {
    let fitment = PartFitment::new(Vehicle::new(2005, "Honda", "Accord"), PositionGroup::default())
        .with_vehicle_id(7)
        .with_position_ids(vec![1, 2]);
    let result = ValidationResult::new(ValidationStatus::Warning, "check", Some(fitment), "raw")
        .with_suggestions(vec!["EX".to_string(), "LX".to_string()]);
    let json = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(json["status"], "WARNING");
    assert_eq!(json["fitment"]["vcdb_vehicle_id"], 7);
    assert_eq!(json["fitment"]["pcdb_position_ids"], serde_json::json!([1, 2]));
    assert_eq!(json["suggestions"], serde_json::json!(["EX", "LX"]));
}

#[test]
fn summary_merges() {
    let mut summary = ValidationSummary::default();
    summary.record(ValidationStatus::Valid);
    let mut other = ValidationSummary::default();
    other.record(ValidationStatus::Error);
    other.record(ValidationStatus::Warning);
    summary.merge(other);
    assert_eq!(summary.total(), 3);
    assert!(summary.has_errors());
}
