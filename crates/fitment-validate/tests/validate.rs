//! Validator behaviour against small catalog snapshots.

use fitment_model::{
    PartFitment, PcdbPosition, Position, PositionAxis, PositionGroup, ValidationStatus,
    VcdbVehicle, Vehicle,
};
use fitment_validate::{FITMENT_VALID, FitmentValidator, NO_VALID_POSITIONS, NO_VEHICLE_MATCH};
use proptest::prelude::*;

fn catalog_vehicle(
    id: u32,
    year: u16,
    make: &str,
    model: &str,
    submodel: Option<&str>,
) -> VcdbVehicle {
    VcdbVehicle {
        id,
        base_vehicle_id: id * 10,
        submodel_id: submodel.map(|_| id * 100),
        region_id: Some(1),
        year,
        make: make.to_string(),
        model: model.to_string(),
        submodel: submodel.map(str::to_string),
    }
}

fn front_positions() -> Vec<PcdbPosition> {
    vec![
        PcdbPosition::new(1, "Front Left")
            .with(PositionAxis::FrontRear, Position::Front)
            .with(PositionAxis::LeftRight, Position::Left),
        PcdbPosition::new(2, "Front Right")
            .with(PositionAxis::FrontRear, Position::Front)
            .with(PositionAxis::LeftRight, Position::Right),
    ]
}

fn front_left() -> PositionGroup {
    PositionGroup::default()
        .with(PositionAxis::FrontRear, Position::Front)
        .with(PositionAxis::LeftRight, Position::Left)
}

fn accord(year: u16, position: PositionGroup) -> PartFitment {
    PartFitment::new(Vehicle::new(year, "Honda", "Accord"), position)
}

#[test]
fn exact_match_is_valid() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(10, 2008, "HONDA", "accord", None)];
    let fitment = accord(2008, front_left());

    let result = validator.validate_fitment(&fitment, &vehicles);

    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.message, FITMENT_VALID);
    let enriched = result.fitment.expect("fitment");
    assert_eq!(enriched.vcdb_vehicle_id, Some(10));
    assert_eq!(enriched.pcdb_position_ids, Some(vec![1, 2]));
    // the input is never modified
    assert_eq!(fitment.vcdb_vehicle_id, None);
}

#[test]
fn first_exact_match_wins() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![
        catalog_vehicle(11, 2008, "Honda", "Accord", Some("EX")),
        catalog_vehicle(12, 2008, "Honda", "Accord", None),
        catalog_vehicle(13, 2008, "Honda", "Accord", None),
    ];
    let result = validator.validate_fitment(&accord(2008, front_left()), &vehicles);
    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.fitment.and_then(|f| f.vcdb_vehicle_id), Some(12));
}

#[test]
fn submodel_only_candidates_give_warning_with_suggestions() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![
        catalog_vehicle(21, 2008, "Honda", "Accord", Some("EX")),
        catalog_vehicle(22, 2008, "Honda", "Accord", Some("LX")),
        catalog_vehicle(23, 2008, "Honda", "Accord", Some("ex")),
    ];
    let result = validator.validate_fitment(&accord(2008, front_left()), &vehicles);

    assert_eq!(result.status, ValidationStatus::Warning);
    assert_eq!(result.suggestions, vec!["EX".to_string(), "LX".to_string()]);
    assert!(result.message.contains("EX, LX"));
    let enriched = result.fitment.expect("fitment");
    assert_eq!(enriched.vcdb_vehicle_id, Some(21));
    assert_eq!(enriched.pcdb_position_ids, Some(vec![1, 2]));
}

#[test]
fn matching_submodels_are_exact() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![
        catalog_vehicle(31, 2008, "Honda", "Accord", Some("LX")),
        catalog_vehicle(32, 2008, "Honda", "Accord", Some("EX")),
    ];
    let mut fitment = accord(2008, front_left());
    fitment.vehicle = fitment.vehicle.with_submodel("ex");
    let result = validator.validate_fitment(&fitment, &vehicles);
    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.fitment.and_then(|f| f.vcdb_vehicle_id), Some(32));
}

#[test]
fn submodel_mismatch_is_an_error() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(41, 2008, "Honda", "Accord", Some("LX"))];
    let mut fitment = accord(2008, front_left());
    fitment.vehicle = fitment.vehicle.with_submodel("Sport");
    let result = validator.validate_fitment(&fitment, &vehicles);
    assert_eq!(result.status, ValidationStatus::Error);
}

#[test]
fn missing_vehicle_skips_position_phase() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(51, 2009, "Honda", "Accord", None)];
    let result = validator.validate_fitment(&accord(2008, front_left()), &vehicles);

    assert_eq!(result.status, ValidationStatus::Error);
    assert_eq!(result.message, NO_VEHICLE_MATCH);
    let fitment = result.fitment.expect("fitment");
    assert_eq!(fitment.vcdb_vehicle_id, None);
    assert_eq!(fitment.pcdb_position_ids, None);
}

#[test]
fn unindexed_position_is_an_error() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(61, 2008, "Honda", "Accord", None)];
    let rear = PositionGroup::default().with(PositionAxis::FrontRear, Position::Rear);
    let result = validator.validate_fitment(&accord(2008, rear), &vehicles);

    assert_eq!(result.status, ValidationStatus::Error);
    assert!(result.message.contains("front_rear"));
    // the vehicle phase already matched
    assert_eq!(result.fitment.and_then(|f| f.vcdb_vehicle_id), Some(61));
}

#[test]
fn varies_with_application_is_a_warning() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(71, 2008, "Honda", "Accord", None)];
    let varies =
        PositionGroup::default().with(PositionAxis::FrontRear, Position::VariesWithApplication);
    let result = validator.validate_fitment(&accord(2008, varies), &vehicles);

    assert_eq!(result.status, ValidationStatus::Warning);
    assert!(result.message.contains("manual review"));
}

#[test]
fn warnings_from_both_phases_are_joined() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(81, 2008, "Honda", "Accord", Some("EX"))];
    let varies =
        PositionGroup::default().with(PositionAxis::FrontRear, Position::VariesWithApplication);
    let result = validator.validate_fitment(&accord(2008, varies), &vehicles);

    assert_eq!(result.status, ValidationStatus::Warning);
    let parts: Vec<&str> = result.message.split("; ").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].contains("EX"));
    assert!(parts[1].contains("varies with application"));
}

#[test]
fn non_ascii_names_match_case_insensitively() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(95, 2012, "CITROËN", "C4", Some("Exclusive"))];
    let fitment = PartFitment::new(
        Vehicle::new(2012, "Citroën", "c4").with_submodel("EXCLUSIVE"),
        front_left(),
    );

    let result = validator.validate_fitment(&fitment, &vehicles);

    assert_eq!(result.status, ValidationStatus::Valid, "{}", result.message);
    assert_eq!(result.fitment.and_then(|f| f.vcdb_vehicle_id), Some(95));
}

#[test]
fn unspecified_position_is_valid_with_no_ids() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(91, 2020, "Universal", "Universal", None)];
    let fitment = PartFitment::new(
        Vehicle::new(2020, "Universal", "Universal"),
        PositionGroup::default(),
    );
    let result = validator.validate_fitment(&fitment, &vehicles);

    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.fitment.and_then(|f| f.pcdb_position_ids), Some(vec![]));
}

#[test]
fn empty_catalog_positions_reject_specified_axes() {
    let validator = FitmentValidator::new(1684, &[]);
    let vehicles = vec![catalog_vehicle(92, 2008, "Honda", "Accord", None)];
    let result = validator.validate_fitment(&accord(2008, front_left()), &vehicles);
    assert_eq!(result.status, ValidationStatus::Error);
    assert_ne!(result.message, NO_VALID_POSITIONS);
}

#[test]
fn original_text_is_recorded() {
    let validator = FitmentValidator::new(1684, &front_positions());
    let vehicles = vec![catalog_vehicle(93, 2008, "Honda", "Accord", None)];
    let raw = "2008-2008 Honda Accord (Front Left)";
    let result = validator.validate_for_text(raw, &accord(2008, front_left()), &vehicles);
    assert_eq!(result.original_text, raw);
    let result = validator.validate_fitment(&accord(2008, front_left()), &vehicles);
    assert_eq!(result.original_text, "2008 Honda Accord");
}

proptest! {
    #[test]
    fn exact_match_is_never_an_error(year in 1990u16..2030, extra in 0usize..5) {
        let validator = FitmentValidator::new(1684, &front_positions());
        let mut vehicles: Vec<VcdbVehicle> = (0..extra)
            .map(|i| catalog_vehicle(100 + i as u32, year, "Honda", "Civic", None))
            .collect();
        vehicles.push(catalog_vehicle(7, year, "Honda", "Accord", None));
        let result = validator.validate_fitment(&accord(year, front_left()), &vehicles);
        prop_assert_ne!(result.status, ValidationStatus::Error);
        prop_assert_eq!(result.fitment.and_then(|f| f.vcdb_vehicle_id), Some(7));
    }

    #[test]
    fn validation_is_idempotent(year in 1990u16..2030, with_submodel in any::<bool>()) {
        let validator = FitmentValidator::new(1684, &front_positions());
        let submodel = if with_submodel { Some("EX") } else { None };
        let vehicles = vec![catalog_vehicle(8, year, "Honda", "Accord", submodel)];
        let fitment = accord(year, front_left());
        let first = validator.validate_fitment(&fitment, &vehicles);
        let second = validator.validate_fitment(&fitment, &vehicles);
        prop_assert_eq!(first, second);
    }
}
