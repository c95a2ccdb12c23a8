//! Part mounting positions.
//!
//! A part position is described along four independent axes. Each axis holds
//! one [`Position`] value, defaulting to [`Position::NotApplicable`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single positional value as it appears in the Position Catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Position {
    Front,
    Rear,
    Left,
    Right,
    Upper,
    Lower,
    Inner,
    Outer,
    Center,
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Varies with Application")]
    VariesWithApplication,
}

impl Position {
    /// Returns the catalog label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Front => "Front",
            Position::Rear => "Rear",
            Position::Left => "Left",
            Position::Right => "Right",
            Position::Upper => "Upper",
            Position::Lower => "Lower",
            Position::Inner => "Inner",
            Position::Outer => "Outer",
            Position::Center => "Center",
            Position::NotApplicable => "N/A",
            Position::VariesWithApplication => "Varies with Application",
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, Position::NotApplicable)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "front" => Ok(Position::Front),
            "rear" => Ok(Position::Rear),
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            "upper" => Ok(Position::Upper),
            "lower" => Ok(Position::Lower),
            "inner" => Ok(Position::Inner),
            "outer" => Ok(Position::Outer),
            "center" | "centre" => Ok(Position::Center),
            "" | "n/a" | "na" => Ok(Position::NotApplicable),
            "varies with application" => Ok(Position::VariesWithApplication),
            _ => Err(format!("Unknown position: {s}")),
        }
    }
}

/// The four position axes, in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionAxis {
    FrontRear,
    LeftRight,
    UpperLower,
    InnerOuter,
}

impl PositionAxis {
    pub const ALL: [PositionAxis; 4] = [
        PositionAxis::FrontRear,
        PositionAxis::LeftRight,
        PositionAxis::UpperLower,
        PositionAxis::InnerOuter,
    ];

    /// Field name used in messages and serialized data.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionAxis::FrontRear => "front_rear",
            PositionAxis::LeftRight => "left_right",
            PositionAxis::UpperLower => "upper_lower",
            PositionAxis::InnerOuter => "inner_outer",
        }
    }

    /// The two concrete values a "both" phrase expands to, in enumeration order.
    pub fn pair(&self) -> [Position; 2] {
        match self {
            PositionAxis::FrontRear => [Position::Front, Position::Rear],
            PositionAxis::LeftRight => [Position::Left, Position::Right],
            PositionAxis::UpperLower => [Position::Upper, Position::Lower],
            PositionAxis::InnerOuter => [Position::Inner, Position::Outer],
        }
    }
}

impl fmt::Display for PositionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete positional slot for a part.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PositionGroup {
    #[serde(default)]
    pub front_rear: Position,
    #[serde(default)]
    pub left_right: Position,
    #[serde(default)]
    pub upper_lower: Position,
    #[serde(default)]
    pub inner_outer: Position,
}

impl PositionGroup {
    pub fn get(&self, axis: PositionAxis) -> Position {
        match axis {
            PositionAxis::FrontRear => self.front_rear,
            PositionAxis::LeftRight => self.left_right,
            PositionAxis::UpperLower => self.upper_lower,
            PositionAxis::InnerOuter => self.inner_outer,
        }
    }

    pub fn set(&mut self, axis: PositionAxis, value: Position) {
        match axis {
            PositionAxis::FrontRear => self.front_rear = value,
            PositionAxis::LeftRight => self.left_right = value,
            PositionAxis::UpperLower => self.upper_lower = value,
            PositionAxis::InnerOuter => self.inner_outer = value,
        }
    }

    #[must_use]
    pub fn with(mut self, axis: PositionAxis, value: Position) -> Self {
        self.set(axis, value);
        self
    }

    /// True when no axis carries a position.
    pub fn is_unspecified(&self) -> bool {
        PositionAxis::ALL
            .iter()
            .all(|axis| !self.get(*axis).is_applicable())
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = PositionAxis::ALL
            .iter()
            .map(|axis| self.get(*axis))
            .filter(Position::is_applicable)
            .map(|position| position.as_str())
            .collect();
        if labels.is_empty() {
            f.write_str("N/A")
        } else {
            f.write_str(&labels.join(" "))
        }
    }
}
