//! Collaborator interfaces consumed by the mapping engine.
//!
//! Every method is async so that relational or remote implementations can
//! sit behind the same seams as the in-memory and file-backed ones shipped
//! with this crate.

use std::fmt::Debug;

use async_trait::async_trait;

use fitment_map::MappingDocument;
use fitment_model::{
    FitmentRecord, ModelMappingRule, PartTerminology, PcdbPosition, VcdbVehicle, VehicleQuery,
};

use crate::error::Result;

/// Read access to the Vehicle Catalog.
#[async_trait]
pub trait VehicleCatalog: Debug + Send + Sync {
    /// Vehicles matching every filter set on the query. Make and model
    /// compare case-insensitively.
    async fn get_vehicles(&self, query: &VehicleQuery) -> Result<Vec<VcdbVehicle>>;
}

/// Read access to the Position Catalog.
#[async_trait]
pub trait PositionCatalog: Debug + Send + Sync {
    async fn get_part_terminology(&self, id: u32) -> Result<Option<PartTerminology>>;

    /// Positions for the given ids. Unknown ids are skipped.
    async fn get_positions(&self, ids: &[u32]) -> Result<Vec<PcdbPosition>>;
}

/// Persistent pattern → target rules.
#[async_trait]
pub trait ModelMappingStore: Debug + Send + Sync {
    /// Active rules ordered by priority descending, then pattern.
    async fn list_rules(&self) -> Result<Vec<ModelMappingRule>>;

    async fn get_rule(&self, id: u64) -> Result<Option<ModelMappingRule>>;

    /// Stores a new rule and returns it with its assigned id.
    async fn create_rule(&self, rule: ModelMappingRule) -> Result<ModelMappingRule>;

    async fn update_rule(&self, rule: ModelMappingRule) -> Result<ModelMappingRule>;

    /// Marks a rule inactive. Returns false when the id is unknown.
    async fn deactivate_rule(&self, id: u64) -> Result<bool>;

    /// Removes a rule. Returns false when the id is unknown.
    async fn delete_rule(&self, id: u64) -> Result<bool>;

    /// Inserts every pattern/mapping pair not already present and returns
    /// the number of rules created. Malformed mapping strings are skipped.
    async fn import_document(&self, document: &MappingDocument) -> Result<usize>;

    /// Active rules in the legacy `{pattern: [mapping]}` shape.
    async fn export_document(&self) -> Result<MappingDocument>;
}

/// Destination for validated fitments.
#[async_trait]
pub trait FitmentResultSink: Debug + Send + Sync {
    /// Replaces every record stored for the product.
    async fn save(&self, product_id: &str, records: &[FitmentRecord]) -> Result<bool>;
}
