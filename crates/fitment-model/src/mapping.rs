//! Model mapping rules.
//!
//! A rule translates a fragment of free-text vehicle description into a
//! catalog make/model pair. Rules are stored as typed [`MappingTarget`]
//! values; the `"Make|VehicleCode|Model"` pipe string is only an import and
//! export format, parsed once by [`MappingTarget::parse_legacy`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Make and model names attached to the synthetic catch-all mapping.
pub const UNIVERSAL: &str = "Universal";

/// The decoded right-hand side of a mapping rule. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingTarget {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub vehicle_code: String,
    #[serde(default)]
    pub model: String,
}

impl MappingTarget {
    pub fn new(
        make: impl Into<String>,
        vehicle_code: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            vehicle_code: vehicle_code.into(),
            model: model.into(),
        }
    }

    /// Parses a legacy `Make|VehicleCode|Model` string.
    ///
    /// Returns `None` unless the value has exactly three pipe-delimited fields.
    pub fn parse_legacy(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split('|').collect();
        let [make, vehicle_code, model] = parts.as_slice() else {
            return None;
        };
        Some(Self::new(make.trim(), vehicle_code.trim(), model.trim()))
    }

    /// Renders the legacy pipe string.
    pub fn to_legacy(&self) -> String {
        format!("{}|{}|{}", self.make, self.vehicle_code, self.model)
    }

    /// Resolves the target into a make/model pair, falling back between
    /// fields when some are missing. Returns `None` when every field is empty.
    pub fn resolve(&self) -> Option<ResolvedModel> {
        let make = self.make.as_str();
        let code = self.vehicle_code.as_str();
        let model = self.model.as_str();
        match (!make.is_empty(), !code.is_empty(), !model.is_empty()) {
            (true, _, true) => Some(ResolvedModel::new(make, model)),
            (true, true, false) => Some(ResolvedModel::new(make, code)),
            (true, false, false) => Some(ResolvedModel::new(make, make)),
            (false, _, true) => Some(ResolvedModel::new(model, model)),
            (false, true, false) => Some(ResolvedModel::new(code, code)),
            (false, false, false) => None,
        }
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy())
    }
}

/// A make/model pair produced by the mapping resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub make: String,
    pub model: String,
}

impl ResolvedModel {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
        }
    }

    pub fn universal() -> Self {
        Self::new(UNIVERSAL, UNIVERSAL)
    }
}

/// A persisted pattern → target rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMappingRule {
    pub id: u64,
    pub pattern: String,
    pub target: MappingTarget,
    /// Higher priority rules are listed first.
    #[serde(default)]
    pub priority: i32,
    /// Inactive rules are soft-deleted and never resolved.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ModelMappingRule {
    pub fn new(pattern: impl Into<String>, target: MappingTarget) -> Self {
        Self {
            id: 0,
            pattern: pattern.into(),
            target,
            priority: 0,
            active: true,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
