use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A vehicle described by a part application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: u16,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub submodel: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Vehicle {
    pub fn new(year: u16, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            submodel: None,
            engine: None,
            transmission: None,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_submodel(mut self, submodel: impl Into<String>) -> Self {
        self.submodel = Some(submodel.into());
        self
    }

    /// Submodel with blank values treated as absent.
    pub fn submodel(&self) -> Option<&str> {
        self.submodel
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `"{year} {make} {model}"`, followed by the submodel when present.
    pub fn full_name(&self) -> String {
        match self.submodel() {
            Some(submodel) => format!("{} {} {} {}", self.year, self.make, self.model, submodel),
            None => format!("{} {} {}", self.year, self.make, self.model),
        }
    }
}

/// Case-insensitive name comparison using full Unicode lowercasing.
pub fn names_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_folds_non_ascii() {
        assert!(names_match("CITROËN", "Citroën"));
        assert!(names_match("Škoda", "ŠKODA"));
        assert!(!names_match("Citroen", "Citroën"));
    }

    #[test]
    fn full_name_appends_submodel() {
        let vehicle = Vehicle::new(2008, "Honda", "Accord");
        assert_eq!(vehicle.full_name(), "2008 Honda Accord");
        assert_eq!(vehicle.with_submodel("EX").full_name(), "2008 Honda Accord EX");
    }

    #[test]
    fn blank_submodel_is_absent() {
        let vehicle = Vehicle::new(2008, "Honda", "Accord").with_submodel("  ");
        assert_eq!(vehicle.submodel(), None);
    }
}
