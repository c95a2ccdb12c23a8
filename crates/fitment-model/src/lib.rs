#![deny(unsafe_code)]

pub mod application;
pub mod catalog;
pub mod error;
pub mod mapping;
pub mod position;
pub mod validation;
pub mod vehicle;

pub use application::{PartApplication, PartFitment};
pub use catalog::{FitmentRecord, PartTerminology, PcdbPosition, VcdbVehicle, VehicleQuery};
pub use error::{FitmentError, Result};
pub use mapping::{MappingTarget, ModelMappingRule, ResolvedModel, UNIVERSAL};
pub use position::{Position, PositionAxis, PositionGroup};
pub use validation::{ValidationResult, ValidationStatus, ValidationSummary};
pub use vehicle::{Vehicle, names_match};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let results = vec![
            ValidationResult::new(ValidationStatus::Valid, "ok", None, "a"),
            ValidationResult::new(ValidationStatus::Warning, "check", None, "a"),
            ValidationResult::failed("bad", "b"),
        ];
        let summary = ValidationSummary::from_results(&results);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total(), 3);
        assert!(summary.has_errors());
    }

    #[test]
    fn result_serializes() {
        let fitment = PartFitment::new(
            Vehicle::new(2008, "Honda", "Accord"),
            PositionGroup::default().with(PositionAxis::FrontRear, Position::Front),
        )
        .with_vehicle_id(42);
        let result = ValidationResult::new(ValidationStatus::Valid, "ok", Some(fitment), "raw");
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: ValidationResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
