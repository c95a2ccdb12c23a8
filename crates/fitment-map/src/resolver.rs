//! Model mapping resolution.
//!
//! Vehicle text is matched against a table of patterns by substring
//! containment, longest pattern first. Only the first matching pattern
//! contributes make/model pairs.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use fitment_model::{FitmentError, MappingTarget, ModelMappingRule, ResolvedModel, Result};

/// Legacy flat mapping document: pattern → `Make|VehicleCode|Model` strings.
pub type MappingDocument = BTreeMap<String, Vec<String>>;

/// A pattern and every target registered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub pattern: String,
    pub targets: Vec<MappingTarget>,
}

/// Pattern table used to resolve vehicle text into make/model pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMappingTable {
    /// Sorted by descending pattern length; equal lengths keep insertion order.
    entries: Vec<PatternEntry>,
}

impl ModelMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from persisted rules.
    ///
    /// Inactive rules are skipped. Rules are grouped by pattern in the order
    /// they are first seen, so callers should pass them priority-descending.
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a ModelMappingRule>) -> Self {
        let mut table = Self::new();
        for rule in rules.into_iter().filter(|rule| rule.active) {
            table.push(&rule.pattern, rule.target.clone());
        }
        table.sort();
        table
    }

    /// Builds a table from a legacy mapping document.
    ///
    /// Strings that are not three pipe-delimited fields are dropped here and
    /// never reach the resolver.
    pub fn from_document(document: &MappingDocument) -> Self {
        let mut table = Self::new();
        for (pattern, mappings) in document {
            for mapping in mappings {
                match MappingTarget::parse_legacy(mapping) {
                    Some(target) => table.push(pattern, target),
                    None => warn!(%pattern, %mapping, "skipping malformed model mapping"),
                }
            }
        }
        table.sort();
        table
    }

    /// Loads a legacy mapping document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`FitmentError::Configuration`] when the file cannot be read or
    /// is not a `{pattern: [mapping]}` object.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FitmentError::configuration(format!(
                "failed to read model mappings {}: {e}",
                path.display()
            ))
        })?;
        let document: MappingDocument = serde_json::from_str(&contents).map_err(|e| {
            FitmentError::configuration(format!(
                "failed to parse model mappings {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::from_document(&document))
    }

    fn push(&mut self, pattern: &str, target: MappingTarget) {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|entry| entry.pattern == pattern) {
            Some(entry) => {
                if !entry.targets.contains(&target) {
                    entry.targets.push(target);
                }
            }
            None => self.entries.push(PatternEntry {
                pattern: pattern.to_string(),
                targets: vec![target],
            }),
        }
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| b.pattern.chars().count().cmp(&a.pattern.chars().count()));
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exports the table back into the legacy document format.
    pub fn to_document(&self) -> MappingDocument {
        self.entries
            .iter()
            .map(|entry| {
                (
                    entry.pattern.clone(),
                    entry.targets.iter().map(MappingTarget::to_legacy).collect(),
                )
            })
            .collect()
    }

    /// Resolves vehicle text into make/model pairs.
    ///
    /// # Errors
    ///
    /// Returns [`FitmentError::Parsing`] when no pattern matches and the text
    /// does not mention "universal", or when the matching pattern has no
    /// usable targets.
    pub fn find_model_mapping(&self, vehicle_text: &str) -> Result<Vec<ResolvedModel>> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| vehicle_text.contains(entry.pattern.as_str()))
        {
            let resolved: Vec<ResolvedModel> = entry
                .targets
                .iter()
                .filter_map(MappingTarget::resolve)
                .collect();
            debug!(
                vehicle_text,
                pattern = %entry.pattern,
                count = resolved.len(),
                "resolved model mapping"
            );
            if resolved.is_empty() {
                return Err(FitmentError::parsing(format!(
                    "Model mapping for pattern '{}' has no usable entries",
                    entry.pattern
                )));
            }
            return Ok(resolved);
        }

        if vehicle_text.to_lowercase().contains("universal") {
            debug!(vehicle_text, "falling back to universal mapping");
            return Ok(vec![ResolvedModel::universal()]);
        }

        Err(FitmentError::parsing(format!(
            "No model mapping found for '{vehicle_text}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(entries: &[(&str, Vec<&str>)]) -> MappingDocument {
        entries
            .iter()
            .map(|(pattern, mappings)| {
                (
                    pattern.to_string(),
                    mappings.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn longest_pattern_wins() {
        let table = ModelMappingTable::from_document(&document(&[
            ("Honda", vec!["Honda|Universal|"]),
            ("Honda Accord", vec!["Honda||Accord"]),
        ]));
        let resolved = table.find_model_mapping("Honda Accord Coupe").expect("resolve");
        assert_eq!(resolved, vec![ResolvedModel::new("Honda", "Accord")]);
    }

    #[test]
    fn returns_every_target_of_the_first_pattern() {
        let table = ModelMappingTable::from_document(&document(&[(
            "Accord/Civic",
            vec!["Honda||Accord", "Honda||Civic", "not-three-fields"],
        )]));
        let resolved = table.find_model_mapping("Honda Accord/Civic").expect("resolve");
        assert_eq!(
            resolved,
            vec![
                ResolvedModel::new("Honda", "Accord"),
                ResolvedModel::new("Honda", "Civic"),
            ]
        );
    }

    #[test]
    fn universal_fallback() {
        let table = ModelMappingTable::new();
        let resolved = table.find_model_mapping("UNIVERSAL Widget").expect("resolve");
        assert_eq!(resolved, vec![ResolvedModel::universal()]);
        assert!(table.find_model_mapping("Honda Accord").is_err());
    }

    #[test]
    fn matching_is_case_sensitive_substring() {
        let table =
            ModelMappingTable::from_document(&document(&[("Accord", vec!["Honda||Accord"])]));
        assert!(table.find_model_mapping("honda accord").is_err());
    }

    #[test]
    fn equal_length_patterns_keep_priority_order() {
        let accord = ModelMappingRule::new("Accord", MappingTarget::new("Honda", "", "Accord"))
            .with_priority(5);
        let sedan = ModelMappingRule::new("Sedan!", MappingTarget::new("Honda", "", "Sedan"));

        let table = ModelMappingTable::from_rules([&accord, &sedan]);
        let resolved = table.find_model_mapping("Accord Sedan!").expect("resolve");
        assert_eq!(resolved, vec![ResolvedModel::new("Honda", "Accord")]);

        let sedan = sedan.with_priority(9);
        let table = ModelMappingTable::from_rules([&sedan, &accord]);
        let resolved = table.find_model_mapping("Accord Sedan!").expect("resolve");
        assert_eq!(resolved, vec![ResolvedModel::new("Honda", "Sedan")]);
    }

    #[test]
    fn inactive_rules_are_skipped() {
        let mut retired =
            ModelMappingRule::new("Accord", MappingTarget::new("Honda", "", "Accord"));
        retired.active = false;
        let table = ModelMappingTable::from_rules([&retired]);
        assert!(table.is_empty());
    }

    #[test]
    fn pattern_with_only_empty_targets_is_an_error() {
        let table = ModelMappingTable::from_document(&document(&[("Accord", vec!["||"])]));
        assert!(table.find_model_mapping("Honda Accord").is_err());
    }

    #[test]
    fn inactive_rules_are_skipped_alongside_active() {
        let mut inactive = ModelMappingRule::new("Civic", MappingTarget::new("Honda", "", "Civic"));
        inactive.active = false;
        let active = ModelMappingRule::new("Accord", MappingTarget::new("Honda", "", "Accord"));
        let table = ModelMappingTable::from_rules(&[inactive, active]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].pattern, "Accord");
    }

    #[test]
    fn document_round_trip() {
        let source = document(&[("Camry", vec!["Toyota|XV40|Camry"])]);
        assert_eq!(ModelMappingTable::from_document(&source).to_document(), source);
    }
}
