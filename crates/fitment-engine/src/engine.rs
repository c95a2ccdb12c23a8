//! Mapping engine facade.
//!
//! The engine owns the refreshable model mapping table and the terminology
//! cache, and wires the parser, expander and validator to the external
//! catalogs. Each call snapshots the mapping table, so a refresh never
//! changes the table under an application that is already being processed.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use fitment_catalog::{
    CatalogError, FitmentResultSink, ModelMappingStore, PositionCatalog, VehicleCatalog,
};
use fitment_map::{FitmentExpander, MappingDocument, ModelMappingTable, parse_application};
use fitment_model::{
    FitmentError, FitmentRecord, PartTerminology, PcdbPosition, Result, ValidationResult,
    VehicleQuery,
};
use fitment_validate::FitmentValidator;

use crate::cache::TerminologyCache;
use crate::config::EngineConfig;

#[derive(Debug)]
pub struct MappingEngine {
    vehicles: Arc<dyn VehicleCatalog>,
    positions: Arc<dyn PositionCatalog>,
    store: Option<Arc<dyn ModelMappingStore>>,
    sink: Option<Arc<dyn FitmentResultSink>>,
    /// `None` until one of the `configure_*` methods succeeds.
    expander: RwLock<Option<Arc<FitmentExpander>>>,
    cache: TerminologyCache,
}

impl MappingEngine {
    pub fn new(vehicles: Arc<dyn VehicleCatalog>, positions: Arc<dyn PositionCatalog>) -> Self {
        Self::with_config(vehicles, positions, EngineConfig::default())
    }

    pub fn with_config(
        vehicles: Arc<dyn VehicleCatalog>,
        positions: Arc<dyn PositionCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            vehicles,
            positions,
            store: None,
            sink: None,
            expander: RwLock::new(None),
            cache: TerminologyCache::new(config.cache_capacity),
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ModelMappingStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn FitmentResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn cache(&self) -> &TerminologyCache {
        &self.cache
    }

    pub fn is_configured(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Copy of the active mapping table, if configured.
    pub fn mapping_table(&self) -> Option<ModelMappingTable> {
        self.snapshot().map(|expander| expander.mappings().clone())
    }

    /// Loads the mapping table from the model mapping store.
    ///
    /// Returns the number of patterns installed.
    ///
    /// # Errors
    ///
    /// [`FitmentError::Configuration`] when no store is attached,
    /// [`FitmentError::Mapping`] when the store cannot be read.
    pub async fn configure_from_store(&self) -> Result<usize> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| FitmentError::configuration("no model mapping store configured"))?;
        let rules = store.list_rules().await.map_err(catalog_failure)?;
        let table = ModelMappingTable::from_rules(&rules);
        info!(rules = rules.len(), patterns = table.len(), "model mappings loaded from store");
        Ok(self.install(table))
    }

    /// Loads the mapping table from a `{pattern: [mapping]}` JSON file.
    pub fn configure_from_file(&self, path: &Path) -> Result<usize> {
        let table = ModelMappingTable::from_json_file(path)?;
        info!(
            path = %path.display(),
            patterns = table.len(),
            "model mappings loaded from file"
        );
        Ok(self.install(table))
    }

    pub fn configure_from_document(&self, document: &MappingDocument) -> usize {
        self.install(ModelMappingTable::from_document(document))
    }

    pub fn configure_from_table(&self, table: ModelMappingTable) -> usize {
        self.install(table)
    }

    /// Re-reads the mapping table from the store and invalidates the
    /// terminology cache.
    ///
    /// Returns `false` when no store is attached; the current table is kept.
    pub async fn refresh_mappings(&self) -> Result<bool> {
        self.cache.clear();
        if self.store.is_none() {
            warn!("refresh requested without a model mapping store; keeping current mappings");
            return Ok(false);
        }
        self.configure_from_store().await?;
        Ok(true)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Looks up a part terminology, using the cache when possible.
    ///
    /// # Errors
    ///
    /// [`FitmentError::Mapping`] when the terminology is unknown or the
    /// position catalog fails.
    pub async fn get_part_terminology(&self, id: u32) -> Result<PartTerminology> {
        if let Some(terminology) = self.cache.terminology(id) {
            return Ok(terminology);
        }
        let terminology = self
            .positions
            .get_part_terminology(id)
            .await
            .map_err(catalog_failure)?
            .ok_or_else(|| FitmentError::mapping(format!("Part terminology {id} not found")))?;
        self.cache.insert_terminology(terminology.clone());
        Ok(terminology)
    }

    /// Positions valid for a part terminology, using the cache when possible.
    pub async fn get_pcdb_positions(&self, terminology_id: u32) -> Result<Vec<PcdbPosition>> {
        if let Some(positions) = self.cache.positions(terminology_id) {
            return Ok(positions);
        }
        let terminology = self.get_part_terminology(terminology_id).await?;
        let positions = self
            .positions
            .get_positions(&terminology.valid_positions)
            .await
            .map_err(catalog_failure)?;
        debug!(
            terminology = terminology_id,
            positions = positions.len(),
            "resolved terminology positions"
        );
        self.cache.insert_positions(terminology_id, positions.clone());
        Ok(positions)
    }

    /// Parses, expands and validates one application string.
    ///
    /// Results follow expansion order: year, then model, then position group.
    ///
    /// # Errors
    ///
    /// [`FitmentError::Configuration`] when no mapping table is installed,
    /// [`FitmentError::Parsing`] when the text cannot be expanded and
    /// [`FitmentError::Mapping`] for unknown terminologies or catalog failures.
    pub async fn process_application(
        &self,
        text: &str,
        terminology_id: u32,
    ) -> Result<Vec<ValidationResult>> {
        let expander = self.require_expander()?;
        let application = parse_application(text)?;
        let fitments = expander.process_application(&application)?;

        let positions = self.get_pcdb_positions(terminology_id).await?;
        let validator = FitmentValidator::new(terminology_id, &positions);

        let mut results = Vec::with_capacity(fitments.len());
        for fitment in &fitments {
            let query = VehicleQuery::new(
                fitment.vehicle.year,
                fitment.vehicle.make.clone(),
                fitment.vehicle.model.clone(),
            );
            let vehicles = self
                .vehicles
                .get_vehicles(&query)
                .await
                .map_err(catalog_failure)?;
            results.push(validator.validate_for_text(text, fitment, &vehicles));
        }
        debug!(text, fitments = results.len(), "processed application");
        Ok(results)
    }

    /// Processes every text in order. See [`Self::batch_process_with`].
    pub async fn batch_process_applications<S: AsRef<str>>(
        &self,
        texts: &[S],
        terminology_id: u32,
    ) -> Result<BTreeMap<String, Vec<ValidationResult>>> {
        self.batch_process_with(texts, terminology_id, |_, _| {}).await
    }

    /// Processes every text in order, calling `on_item` after each one.
    ///
    /// A failure on one text becomes a single ERROR result for that text and
    /// never aborts the batch. Engine misconfiguration is reported before any
    /// text is processed.
    pub async fn batch_process_with<S, F>(
        &self,
        texts: &[S],
        terminology_id: u32,
        mut on_item: F,
    ) -> Result<BTreeMap<String, Vec<ValidationResult>>>
    where
        S: AsRef<str>,
        F: FnMut(&str, &[ValidationResult]),
    {
        self.require_expander()?;
        info!(count = texts.len(), terminology = terminology_id, "batch started");

        let mut output = BTreeMap::new();
        for text in texts {
            let text = text.as_ref();
            let results = match self.process_application(text, terminology_id).await {
                Ok(results) => results,
                Err(error) if error.is_engine_level() => return Err(error),
                Err(error) => {
                    warn!(text, %error, "application failed");
                    vec![ValidationResult::failed(error.to_string(), text)]
                }
            };
            on_item(text, &results);
            output.insert(text.to_string(), results);
        }

        info!(count = output.len(), "batch finished");
        Ok(output)
    }

    /// Hands every non-ERROR result with a matched vehicle to the result
    /// sink, replacing what was stored for `product_id`.
    ///
    /// Returns the number of records saved.
    ///
    /// # Errors
    ///
    /// [`FitmentError::Configuration`] when no sink is attached,
    /// [`FitmentError::Mapping`] when the sink fails or refuses the write.
    pub async fn save_mapping_results(
        &self,
        product_id: &str,
        results: &[ValidationResult],
    ) -> Result<usize> {
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| FitmentError::configuration("no fitment result sink configured"))?;

        let records: Vec<FitmentRecord> = results
            .iter()
            .filter(|result| !result.is_error())
            .filter_map(|result| result.fitment.as_ref())
            .filter_map(|fitment| {
                Some(FitmentRecord {
                    vcdb_vehicle_id: fitment.vcdb_vehicle_id?,
                    pcdb_position_ids: fitment.pcdb_position_ids.clone().unwrap_or_default(),
                    year: fitment.vehicle.year,
                    make: fitment.vehicle.make.clone(),
                    model: fitment.vehicle.model.clone(),
                    submodel: fitment.vehicle.submodel.clone(),
                    notes: fitment.notes.clone(),
                })
            })
            .collect();

        let accepted = sink.save(product_id, &records).await.map_err(catalog_failure)?;
        if !accepted {
            return Err(FitmentError::mapping(format!(
                "result sink rejected {} record(s) for product {product_id}",
                records.len()
            )));
        }
        info!(product = product_id, records = records.len(), "mapping results saved");
        Ok(records.len())
    }

    fn install(&self, table: ModelMappingTable) -> usize {
        let patterns = table.len();
        let expander = Arc::new(FitmentExpander::new(table));
        *self
            .expander
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(expander);
        patterns
    }

    fn snapshot(&self) -> Option<Arc<FitmentExpander>> {
        self.expander
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn require_expander(&self) -> Result<Arc<FitmentExpander>> {
        self.snapshot()
            .ok_or_else(|| FitmentError::configuration("model mappings are not configured"))
    }
}

fn catalog_failure(error: CatalogError) -> FitmentError {
    FitmentError::mapping(error.to_string())
}
