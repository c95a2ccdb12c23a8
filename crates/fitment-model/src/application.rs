use serde::{Deserialize, Serialize};

use crate::position::PositionGroup;
use crate::vehicle::Vehicle;

/// A raw part application string and the segments parsed out of it.
///
/// `year_range` is `None` when the string has no leading `YYYY-YYYY` anchor;
/// such applications cannot be expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartApplication {
    pub raw_text: String,
    pub year_range: Option<(u16, u16)>,
    pub vehicle_text: Option<String>,
    pub position_text: Option<String>,
    pub additional_notes: Option<String>,
}

impl PartApplication {
    /// An application that carries only the raw text.
    pub fn unparsed(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.year_range.is_some()
    }
}

/// One concrete vehicle/position pair for a part.
///
/// Catalog identifiers stay unset until the fitment has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartFitment {
    pub vehicle: Vehicle,
    pub position: PositionGroup,
    #[serde(default)]
    pub vcdb_vehicle_id: Option<u32>,
    #[serde(default)]
    pub pcdb_position_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PartFitment {
    pub fn new(vehicle: Vehicle, position: PositionGroup) -> Self {
        Self {
            vehicle,
            position,
            vcdb_vehicle_id: None,
            pcdb_position_ids: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    #[must_use]
    pub fn with_vehicle_id(mut self, id: u32) -> Self {
        self.vcdb_vehicle_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_position_ids(mut self, ids: Vec<u32>) -> Self {
        self.pcdb_position_ids = Some(ids);
        self
    }
}
