//! Two-phase fitment validation.
//!
//! The vehicle phase looks for the fitment's vehicle in the catalog rows
//! supplied by the caller. The position phase checks every specified axis
//! against the positions valid for the part terminology. A vehicle ERROR
//! short-circuits: positions are never checked for a vehicle that does not
//! exist.

use std::collections::BTreeSet;

use tracing::debug;

use fitment_model::{
    PartFitment, PcdbPosition, Position, PositionAxis, ValidationResult, ValidationStatus,
    VcdbVehicle, names_match,
};

use crate::index::PositionIndex;

pub const NO_VEHICLE_MATCH: &str = "No matching vehicle found in VCDB";
pub const NO_VALID_POSITIONS: &str = "No valid positions found for this part terminology";
pub const FITMENT_VALID: &str = "Fitment is valid";

/// Outcome of a single validation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PhaseOutcome {
    Valid,
    Warning {
        message: String,
        suggestions: Vec<String>,
    },
    Error(String),
}

/// Validates fitments for one part terminology.
#[derive(Debug, Clone)]
pub struct FitmentValidator {
    part_terminology_id: u32,
    index: PositionIndex,
}

impl FitmentValidator {
    pub fn new(part_terminology_id: u32, valid_positions: &[PcdbPosition]) -> Self {
        Self {
            part_terminology_id,
            index: PositionIndex::build(valid_positions),
        }
    }

    pub fn part_terminology_id(&self) -> u32 {
        self.part_terminology_id
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    /// Validates a fitment against the vehicles available for it.
    ///
    /// The input is left untouched; the returned result carries a copy of
    /// the fitment with `vcdb_vehicle_id` and `pcdb_position_ids` filled in
    /// for every phase that matched.
    pub fn validate_fitment(
        &self,
        fitment: &PartFitment,
        available_vehicles: &[VcdbVehicle],
    ) -> ValidationResult {
        self.validate_for_text(&fitment.vehicle.full_name(), fitment, available_vehicles)
    }

    /// Same as [`Self::validate_fitment`], recording `original_text` (usually
    /// the application string the fitment was expanded from) on the result.
    pub fn validate_for_text(
        &self,
        original_text: &str,
        fitment: &PartFitment,
        available_vehicles: &[VcdbVehicle],
    ) -> ValidationResult {
        let mut enriched = fitment.clone();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        match self.check_vehicle(&mut enriched, available_vehicles) {
            PhaseOutcome::Valid => {}
            PhaseOutcome::Warning {
                message,
                suggestions: submodels,
            } => {
                warnings.push(message);
                suggestions.extend(submodels);
            }
            PhaseOutcome::Error(message) => {
                debug!(vehicle = %fitment.vehicle.full_name(), "vehicle not found in catalog");
                return ValidationResult::new(
                    ValidationStatus::Error,
                    message,
                    Some(enriched),
                    original_text,
                );
            }
        }

        match self.check_positions(&mut enriched) {
            PhaseOutcome::Valid => {}
            PhaseOutcome::Warning {
                message,
                suggestions: extra,
            } => {
                warnings.push(message);
                suggestions.extend(extra);
            }
            PhaseOutcome::Error(message) => {
                debug!(vehicle = %fitment.vehicle.full_name(), %message, "position check failed");
                return ValidationResult::new(
                    ValidationStatus::Error,
                    message,
                    Some(enriched),
                    original_text,
                );
            }
        }

        if warnings.is_empty() {
            ValidationResult::new(
                ValidationStatus::Valid,
                FITMENT_VALID,
                Some(enriched),
                original_text,
            )
        } else {
            ValidationResult::new(
                ValidationStatus::Warning,
                warnings.join("; "),
                Some(enriched),
                original_text,
            )
            .with_suggestions(suggestions)
        }
    }

    fn check_vehicle(
        &self,
        fitment: &mut PartFitment,
        available_vehicles: &[VcdbVehicle],
    ) -> PhaseOutcome {
        let vehicle = &fitment.vehicle;
        let wanted_submodel = vehicle.submodel();

        let same_base = |candidate: &&VcdbVehicle| {
            candidate.year == vehicle.year
                && names_match(&candidate.make, &vehicle.make)
                && names_match(&candidate.model, &vehicle.model)
        };

        let exact = available_vehicles
            .iter()
            .filter(same_base)
            .find(|candidate| match (wanted_submodel, candidate.submodel()) {
                (None, None) => true,
                (Some(wanted), Some(found)) => names_match(wanted, found),
                _ => false,
            });
        if let Some(candidate) = exact {
            fitment.vcdb_vehicle_id = Some(candidate.id);
            return PhaseOutcome::Valid;
        }

        if wanted_submodel.is_none() {
            let partial: Vec<&VcdbVehicle> = available_vehicles
                .iter()
                .filter(same_base)
                .filter(|candidate| candidate.submodel().is_some())
                .collect();
            if let Some(first) = partial.first() {
                let mut seen = BTreeSet::new();
                let submodels: Vec<String> = partial
                    .iter()
                    .filter_map(|candidate| candidate.submodel())
                    .filter(|submodel| seen.insert(submodel.to_lowercase()))
                    .map(str::to_string)
                    .collect();
                let vehicle_id = first.id;
                let message = format!(
                    "Vehicle matched without submodel (available submodels: {})",
                    submodels.join(", ")
                );
                fitment.vcdb_vehicle_id = Some(vehicle_id);
                return PhaseOutcome::Warning {
                    message,
                    suggestions: submodels,
                };
            }
        }

        PhaseOutcome::Error(NO_VEHICLE_MATCH.to_string())
    }

    fn check_positions(&self, fitment: &mut PartFitment) -> PhaseOutcome {
        let mut matched: BTreeSet<u32> = BTreeSet::new();
        let mut any_specified = false;

        for axis in PositionAxis::ALL {
            let value = fitment.position.get(axis);
            if !value.is_applicable() {
                continue;
            }
            any_specified = true;
            match self.index.ids(axis, value) {
                Some(ids) => matched.extend(ids.iter().copied()),
                None if value == Position::VariesWithApplication => {
                    return PhaseOutcome::Warning {
                        message: format!(
                            "{axis} position varies with application, manual review needed"
                        ),
                        suggestions: Vec::new(),
                    };
                }
                None => {
                    let valid: Vec<&str> = self
                        .index
                        .values(axis)
                        .iter()
                        .map(|position| position.as_str())
                        .collect();
                    return PhaseOutcome::Error(format!(
                        "Invalid {axis} position '{value}' for part terminology {} (valid: {})",
                        self.part_terminology_id,
                        if valid.is_empty() {
                            "none".to_string()
                        } else {
                            valid.join(", ")
                        }
                    ));
                }
            }
        }

        if matched.is_empty() && any_specified {
            return PhaseOutcome::Error(NO_VALID_POSITIONS.to_string());
        }
        fitment.pcdb_position_ids = Some(matched.into_iter().collect());
        PhaseOutcome::Valid
    }
}
