//! Rows exchanged with the Vehicle Catalog, the Position Catalog and the
//! fitment result sink.

use serde::{Deserialize, Serialize};

use crate::position::{Position, PositionAxis};
use crate::vehicle::names_match;

/// A vehicle configuration from the Vehicle Catalog (VCdb).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcdbVehicle {
    pub id: u32,
    pub base_vehicle_id: u32,
    #[serde(default)]
    pub submodel_id: Option<u32>,
    #[serde(default)]
    pub region_id: Option<u32>,
    pub year: u16,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub submodel: Option<String>,
}

impl VcdbVehicle {
    /// Submodel with blank values treated as absent.
    pub fn submodel(&self) -> Option<&str> {
        self.submodel
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Optional filters for a Vehicle Catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
}

impl VehicleQuery {
    pub fn new(year: u16, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year: Some(year),
            make: Some(make.into()),
            model: Some(model.into()),
        }
    }

    /// Returns true when the vehicle satisfies every filter that is set.
    /// Make and model compare case-insensitively.
    pub fn matches(&self, vehicle: &VcdbVehicle) -> bool {
        self.year.is_none_or(|year| year == vehicle.year)
            && self
                .make
                .as_deref()
                .is_none_or(|make| names_match(make, &vehicle.make))
            && self
                .model
                .as_deref()
                .is_none_or(|model| names_match(model, &vehicle.model))
    }
}

/// A standardized part type from the Position Catalog (PCdb).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTerminology {
    pub id: u32,
    pub name: String,
    pub category_id: u32,
    pub subcategory_id: u32,
    pub valid_positions: Vec<u32>,
}

/// A valid mounting position from the Position Catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcdbPosition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub front_rear: Option<Position>,
    #[serde(default)]
    pub left_right: Option<Position>,
    #[serde(default)]
    pub upper_lower: Option<Position>,
    #[serde(default)]
    pub inner_outer: Option<Position>,
}

impl PcdbPosition {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            front_rear: None,
            left_right: None,
            upper_lower: None,
            inner_outer: None,
        }
    }

    #[must_use]
    pub fn with(mut self, axis: PositionAxis, value: Position) -> Self {
        match axis {
            PositionAxis::FrontRear => self.front_rear = Some(value),
            PositionAxis::LeftRight => self.left_right = Some(value),
            PositionAxis::UpperLower => self.upper_lower = Some(value),
            PositionAxis::InnerOuter => self.inner_outer = Some(value),
        }
        self
    }

    pub fn get(&self, axis: PositionAxis) -> Option<Position> {
        match axis {
            PositionAxis::FrontRear => self.front_rear,
            PositionAxis::LeftRight => self.left_right,
            PositionAxis::UpperLower => self.upper_lower,
            PositionAxis::InnerOuter => self.inner_outer,
        }
    }
}

/// A validated fitment in the shape handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitmentRecord {
    pub vcdb_vehicle_id: u32,
    pub pcdb_position_ids: Vec<u32>,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub submodel: Option<String>,
    pub notes: Option<String>,
}
