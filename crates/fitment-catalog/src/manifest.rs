//! `catalog.toml` layout.
//!
//! ```toml
//! [manifest]
//! schema = "fitment.catalog-manifest"
//! schema_version = 1
//!
//! [engine]
//! cache_capacity = 256
//!
//! [[files]]
//! path = "vehicles.csv"
//! kind = "csv"
//! role = "vcdb_vehicles"
//! sha256 = "..."
//! ```

use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "catalog.toml";
pub const MANIFEST_SCHEMA: &str = "fitment.catalog-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    #[serde(default)]
    pub engine: Option<EngineSettings>,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Engine tuning carried alongside the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub kind: String,
    pub role: String,
    /// Optional pin; verified on load when present.
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
