use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use fitment_map::MappingDocument;
use fitment_model::{PartTerminology, PcdbPosition, VcdbVehicle};

use crate::error::{CatalogError, Result};
use crate::hash::sha256_hex;
use crate::loaders::{
    parse_mapping_json, parse_positions_csv, parse_terminologies_csv, parse_vehicles_csv,
};
use crate::manifest::{
    MANIFEST_FILE, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile,
};
use crate::memory::{InMemoryPositionCatalog, InMemoryVehicleCatalog};

pub const ROLE_VEHICLES: &str = "vcdb_vehicles";
pub const ROLE_POSITIONS: &str = "pcdb_positions";
pub const ROLE_TERMINOLOGIES: &str = "pcdb_terminologies";
pub const ROLE_MODEL_MAPPINGS: &str = "model_mappings";

const REQUIRED_ROLES: &[&str] = &[ROLE_VEHICLES, ROLE_POSITIONS, ROLE_TERMINOLOGIES];

const KNOWN_ROLES: &[&str] = &[
    ROLE_VEHICLES,
    ROLE_POSITIONS,
    ROLE_TERMINOLOGIES,
    ROLE_MODEL_MAPPINGS,
];

const ALLOWED_KINDS: &[&str] = &["csv", "json"];

#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub catalog_dir: PathBuf,
    pub file_count: usize,
    pub pinned_file_count: usize,
    pub vehicle_count: usize,
    pub position_count: usize,
    pub terminology_count: usize,
    pub mapping_pattern_count: usize,
}

/// A catalog directory loaded and verified against its manifest.
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    pub catalog_dir: PathBuf,
    pub manifest: Manifest,
    pub vehicles: Vec<VcdbVehicle>,
    pub positions: Vec<PcdbPosition>,
    pub terminologies: Vec<PartTerminology>,
    pub model_mappings: Option<MappingDocument>,
}

impl CatalogRegistry {
    /// Reads `catalog.toml` from `catalog_dir`, verifies every pinned file
    /// and loads each role.
    pub fn load(catalog_dir: &Path) -> Result<Self> {
        let manifest = load_manifest(&catalog_dir.join(MANIFEST_FILE))?;
        validate_manifest(&manifest)?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        for file in &files {
            verify_file(catalog_dir, file)?;
        }

        let vehicles =
            parse_vehicles_csv(&resolve_role_path(catalog_dir, &files, ROLE_VEHICLES)?)?;
        let positions =
            parse_positions_csv(&resolve_role_path(catalog_dir, &files, ROLE_POSITIONS)?)?;
        let terminologies = parse_terminologies_csv(&resolve_role_path(
            catalog_dir,
            &files,
            ROLE_TERMINOLOGIES,
        )?)?;
        let model_mappings = files
            .iter()
            .find(|f| f.role == ROLE_MODEL_MAPPINGS)
            .map(|f| parse_mapping_json(&catalog_dir.join(&f.path)))
            .transpose()?;

        let registry = Self {
            catalog_dir: catalog_dir.to_path_buf(),
            manifest,
            vehicles,
            positions,
            terminologies,
            model_mappings,
        };
        let summary = registry.summary();
        info!(
            catalog = %catalog_dir.display(),
            vehicles = summary.vehicle_count,
            positions = summary.position_count,
            terminologies = summary.terminology_count,
            "catalog loaded"
        );
        Ok(registry)
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            catalog_dir: self.catalog_dir.clone(),
            file_count: self.manifest.files.len(),
            pinned_file_count: self
                .manifest
                .files
                .iter()
                .filter(|f| f.sha256.is_some())
                .count(),
            vehicle_count: self.vehicles.len(),
            position_count: self.positions.len(),
            terminology_count: self.terminologies.len(),
            mapping_pattern_count: self
                .model_mappings
                .as_ref()
                .map_or(0, MappingDocument::len),
        }
    }

    /// Cache capacity requested by the manifest's `[engine]` table.
    pub fn cache_capacity(&self) -> Option<usize> {
        self.manifest
            .engine
            .as_ref()
            .and_then(|engine| engine.cache_capacity)
    }

    pub fn vehicle_catalog(&self) -> InMemoryVehicleCatalog {
        InMemoryVehicleCatalog::new(self.vehicles.clone())
    }

    pub fn position_catalog(&self) -> InMemoryPositionCatalog {
        InMemoryPositionCatalog::new(self.terminologies.clone(), self.positions.clone())
    }
}

fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::io(path, e)
        }
    })?;
    toml::from_str(&contents).map_err(|e| CatalogError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(CatalogError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(CatalogError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }
    if manifest
        .engine
        .as_ref()
        .and_then(|engine| engine.cache_capacity)
        == Some(0)
    {
        return Err(CatalogError::InvalidManifest {
            message: "engine.cache_capacity must be at least 1".to_string(),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(CatalogError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        if !KNOWN_ROLES.contains(&file.role.as_str()) {
            return Err(CatalogError::InvalidManifest {
                message: format!("unknown role '{}' for {}", file.role, file.path),
            });
        }
        if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
            return Err(CatalogError::InvalidManifest {
                message: format!("unsupported kind '{}' for {}", file.kind, file.path),
            });
        }
        if let Some(sha) = &file.sha256 {
            validate_sha(sha, &file.path)?;
        }
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(CatalogError::MissingRole {
                role: (*role).to_string(),
            });
        }
    }
    Ok(())
}

fn verify_file(catalog_dir: &Path, file: &ManifestFile) -> Result<()> {
    let full_path = catalog_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            CatalogError::io(full_path.clone(), e)
        }
    })?;

    let Some(expected) = file.sha256.as_deref().map(str::to_ascii_lowercase) else {
        debug!(path = %full_path.display(), "no sha256 pin");
        return Ok(());
    };
    let actual = sha256_hex(&bytes);
    if actual != expected {
        return Err(CatalogError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn resolve_role_path(catalog_dir: &Path, files: &[ManifestFile], role: &str) -> Result<PathBuf> {
    let f = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| CatalogError::MissingRole {
            role: role.to_string(),
        })?;
    Ok(catalog_dir.join(&f.path))
}

fn validate_sha(sha: &str, path: &str) -> Result<()> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CatalogError::InvalidSha256 {
            path: path.to_string(),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<()> {
    if path.contains('\\') {
        return Err(CatalogError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(CatalogError::InvalidPath {
            path: p.to_path_buf(),
            message: "manifest path must be relative".to_string(),
        });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CatalogError::InvalidPath {
            path: p.to_path_buf(),
            message: "manifest path must stay inside the catalog directory".to_string(),
        });
    }
    Ok(())
}
