//! In-memory catalog and store implementations.
//!
//! These back the CLI (after loading a catalog directory) and the tests.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::{debug, warn};

use fitment_map::MappingDocument;
use fitment_model::{
    MappingTarget, ModelMappingRule, PartTerminology, PcdbPosition, VcdbVehicle, VehicleQuery,
};

use crate::error::{CatalogError, Result};
use crate::traits::{ModelMappingStore, PositionCatalog, VehicleCatalog};

#[derive(Debug, Clone, Default)]
pub struct InMemoryVehicleCatalog {
    vehicles: Vec<VcdbVehicle>,
}

impl InMemoryVehicleCatalog {
    pub fn new(vehicles: Vec<VcdbVehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[VcdbVehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[async_trait]
impl VehicleCatalog for InMemoryVehicleCatalog {
    async fn get_vehicles(&self, query: &VehicleQuery) -> Result<Vec<VcdbVehicle>> {
        Ok(self
            .vehicles
            .iter()
            .filter(|vehicle| query.matches(vehicle))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPositionCatalog {
    terminologies: BTreeMap<u32, PartTerminology>,
    positions: BTreeMap<u32, PcdbPosition>,
}

impl InMemoryPositionCatalog {
    pub fn new(terminologies: Vec<PartTerminology>, positions: Vec<PcdbPosition>) -> Self {
        Self {
            terminologies: terminologies.into_iter().map(|t| (t.id, t)).collect(),
            positions: positions.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn terminologies(&self) -> impl Iterator<Item = &PartTerminology> {
        self.terminologies.values()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}

#[async_trait]
impl PositionCatalog for InMemoryPositionCatalog {
    async fn get_part_terminology(&self, id: u32) -> Result<Option<PartTerminology>> {
        Ok(self.terminologies.get(&id).cloned())
    }

    async fn get_positions(&self, ids: &[u32]) -> Result<Vec<PcdbPosition>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.positions.get(id))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
struct StoreState {
    rules: Vec<ModelMappingRule>,
    next_id: u64,
}

impl StoreState {
    fn insert(&mut self, mut rule: ModelMappingRule) -> ModelMappingRule {
        self.next_id += 1;
        rule.id = self.next_id;
        self.rules.push(rule.clone());
        rule
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut ModelMappingRule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }

    fn active_sorted(&self) -> Vec<ModelMappingRule> {
        let mut rules: Vec<ModelMappingRule> =
            self.rules.iter().filter(|rule| rule.active).cloned().collect();
        rules.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.pattern.cmp(&b.pattern))
                .then_with(|| a.id.cmp(&b.id))
        });
        rules
    }
}

/// Model mapping store held in process memory.
///
/// Ids are assigned sequentially from 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    state: RwLock<StoreState>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| CatalogError::backend("mapping store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| CatalogError::backend("mapping store lock poisoned"))
    }
}

#[async_trait]
impl ModelMappingStore for InMemoryMappingStore {
    async fn list_rules(&self) -> Result<Vec<ModelMappingRule>> {
        Ok(self.read()?.active_sorted())
    }

    async fn get_rule(&self, id: u64) -> Result<Option<ModelMappingRule>> {
        Ok(self.read()?.rules.iter().find(|rule| rule.id == id).cloned())
    }

    async fn create_rule(&self, rule: ModelMappingRule) -> Result<ModelMappingRule> {
        let created = self.write()?.insert(rule);
        debug!(id = created.id, pattern = %created.pattern, "created model mapping rule");
        Ok(created)
    }

    async fn update_rule(&self, rule: ModelMappingRule) -> Result<ModelMappingRule> {
        let mut state = self.write()?;
        let existing = state
            .find_mut(rule.id)
            .ok_or(CatalogError::RuleNotFound { id: rule.id })?;
        *existing = rule.clone();
        Ok(rule)
    }

    async fn deactivate_rule(&self, id: u64) -> Result<bool> {
        let mut state = self.write()?;
        Ok(match state.find_mut(id) {
            Some(rule) => {
                rule.active = false;
                true
            }
            None => false,
        })
    }

    async fn delete_rule(&self, id: u64) -> Result<bool> {
        let mut state = self.write()?;
        let before = state.rules.len();
        state.rules.retain(|rule| rule.id != id);
        Ok(state.rules.len() != before)
    }

    async fn import_document(&self, document: &MappingDocument) -> Result<usize> {
        let mut state = self.write()?;
        let mut inserted = 0;
        for (pattern, mappings) in document {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                continue;
            }
            for mapping in mappings {
                let Some(target) = MappingTarget::parse_legacy(mapping) else {
                    warn!(pattern, %mapping, "skipping malformed model mapping");
                    continue;
                };
                let present = state
                    .rules
                    .iter()
                    .any(|rule| rule.active && rule.pattern == pattern && rule.target == target);
                if !present {
                    state.insert(ModelMappingRule::new(pattern, target));
                    inserted += 1;
                }
            }
        }
        debug!(inserted, "imported model mapping document");
        Ok(inserted)
    }

    async fn export_document(&self) -> Result<MappingDocument> {
        let mut document = MappingDocument::new();
        for rule in self.read()?.active_sorted() {
            let mappings = document.entry(rule.pattern).or_default();
            let legacy = rule.target.to_legacy();
            if !mappings.contains(&legacy) {
                mappings.push(legacy);
            }
        }
        Ok(document)
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
                    (*pattern).to_string(),
                    mappings.iter().map(|m| (*m).to_string()).collect(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn import_is_idempotent() {
        let store = InMemoryMappingStore::new();
        let doc = document(&[
            ("Honda Accord", vec!["Honda||Accord", "Honda|CV|Accord Crosstour"]),
            ("Civic", vec!["Honda||Civic", "not-a-mapping"]),
        ]);
        assert_eq!(store.import_document(&doc).await.unwrap(), 3);
        assert_eq!(store.import_document(&doc).await.unwrap(), 0);
        assert_eq!(store.list_rules().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_orders_by_priority_then_pattern() {
        let store = InMemoryMappingStore::new();
        let target = MappingTarget::new("Honda", "", "Accord");
        store
            .create_rule(ModelMappingRule::new("b", target.clone()))
            .await
            .unwrap();
        store
            .create_rule(ModelMappingRule::new("a", target.clone()))
            .await
            .unwrap();
        store
            .create_rule(ModelMappingRule::new("z", target).with_priority(5))
            .await
            .unwrap();
        let patterns: Vec<String> = store
            .list_rules()
            .await
            .unwrap()
            .into_iter()
            .map(|rule| rule.pattern)
            .collect();
        assert_eq!(patterns, vec!["z", "a", "b"]);
    }

    #[tokio::test]
    async fn deactivated_rules_are_hidden() {
        let store = InMemoryMappingStore::new();
        let rule = store
            .create_rule(ModelMappingRule::new(
                "Accord",
                MappingTarget::new("Honda", "", "Accord"),
            ))
            .await
            .unwrap();
        assert!(store.deactivate_rule(rule.id).await.unwrap());
        assert!(store.list_rules().await.unwrap().is_empty());
        assert!(store.export_document().await.unwrap().is_empty());
        // soft delete keeps the row
        assert!(store.get_rule(rule.id).await.unwrap().is_some());
        assert!(store.delete_rule(rule.id).await.unwrap());
        assert!(store.get_rule(rule.id).await.unwrap().is_none());
        assert!(!store.delete_rule(rule.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_unknown_rule_fails() {
        let store = InMemoryMappingStore::new();
        let mut rule = ModelMappingRule::new("Accord", MappingTarget::new("Honda", "", "Accord"));
        rule.id = 99;
        let err = store.update_rule(rule).await.unwrap_err();
        assert!(matches!(err, CatalogError::RuleNotFound { id: 99 }));
    }

    #[tokio::test]
    async fn vehicle_query_filters() {
        let catalog = InMemoryVehicleCatalog::new(vec![VcdbVehicle {
            id: 1,
            base_vehicle_id: 10,
            submodel_id: None,
            region_id: None,
            year: 2008,
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            submodel: None,
        }]);
        let found = catalog
            .get_vehicles(&VehicleQuery::new(2008, "HONDA", "accord"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        let none = catalog
            .get_vehicles(&VehicleQuery::new(2009, "Honda", "Accord"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
