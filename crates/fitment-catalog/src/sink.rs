//! File-backed fitment result sink.
//!
//! Results are stored as one JSON document per product. The file stem is the
//! hex encoding of the product id bytes, so distinct ids never share a file.
//! Saving a product replaces its previous document.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use fitment_model::FitmentRecord;

use crate::error::{CatalogError, Result};
use crate::traits::FitmentResultSink;

/// The document written for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFitmentResults {
    pub product_id: String,
    pub saved_at: DateTime<Utc>,
    pub records: Vec<FitmentRecord>,
}

#[derive(Debug, Clone)]
pub struct FileResultSink {
    base_dir: PathBuf,
}

impl FileResultSink {
    /// Opens a sink rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| CatalogError::io(&base_dir, e))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, product_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", file_stem(product_id)))
    }

    /// Reads the stored results for a product, or `None` if nothing was saved.
    pub fn load(&self, product_id: &str) -> Result<Option<StoredFitmentResults>> {
        let path = self.path_for(product_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let stored: StoredFitmentResults =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
                path: path.clone(),
                source: e,
            })?;
        if stored.product_id != product_id {
            return Err(CatalogError::backend(format!(
                "{} holds results for product '{}', expected '{product_id}'",
                path.display(),
                stored.product_id
            )));
        }
        Ok(Some(stored))
    }
}

#[async_trait]
impl FitmentResultSink for FileResultSink {
    async fn save(&self, product_id: &str, records: &[FitmentRecord]) -> Result<bool> {
        let stored = StoredFitmentResults {
            product_id: product_id.to_string(),
            saved_at: Utc::now(),
            records: records.to_vec(),
        };
        let path = self.path_for(product_id);
        tokio::task::spawn_blocking(move || write_atomic(&path, &stored))
            .await
            .map_err(|e| CatalogError::backend(format!("result sink task failed: {e}")))??;
        Ok(true)
    }
}

fn write_atomic(path: &Path, stored: &StoredFitmentResults) -> Result<()> {
    let json = serde_json::to_string_pretty(stored).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|e| CatalogError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| CatalogError::io(path, e))?;
    info!(
        product = %stored.product_id,
        records = stored.records.len(),
        path = %path.display(),
        "saved fitment results"
    );
    Ok(())
}

fn file_stem(product_id: &str) -> String {
    hex::encode(product_id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(vehicle_id: u32, year: u16) -> FitmentRecord {
        FitmentRecord {
            vcdb_vehicle_id: vehicle_id,
            pcdb_position_ids: vec![1, 2],
            year,
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            submodel: None,
            notes: None,
        }
    }

    #[test]
    fn file_names_are_distinct_per_product() {
        let dir = TempDir::new().unwrap();
        let sink = FileResultSink::new(dir.path()).unwrap();
        assert_eq!(sink.path_for("BP-1").file_name().unwrap(), "42502d31.json");
        assert_ne!(sink.path_for("a/b"), sink.path_for("A_B"));
        assert_ne!(sink.path_for("bp-1"), sink.path_for("BP-1"));
    }

    #[tokio::test]
    async fn similar_product_ids_keep_separate_records() {
        let dir = TempDir::new().unwrap();
        let sink = FileResultSink::new(dir.path()).unwrap();

        sink.save("a/b", &[record(1, 2001)]).await.unwrap();
        sink.save("A_B", &[record(2, 2002)]).await.unwrap();

        let first = sink.load("a/b").unwrap().unwrap();
        assert_eq!(first.product_id, "a/b");
        assert_eq!(first.records, vec![record(1, 2001)]);
        let second = sink.load("A_B").unwrap().unwrap();
        assert_eq!(second.records, vec![record(2, 2002)]);
    }

    #[test]
    fn load_rejects_a_document_for_another_product() {
        let dir = TempDir::new().unwrap();
        let sink = FileResultSink::new(dir.path()).unwrap();
        let stored = StoredFitmentResults {
            product_id: "OTHER".to_string(),
            saved_at: Utc::now(),
            records: vec![record(1, 2001)],
        };
        write_atomic(&sink.path_for("BP-1"), &stored).unwrap();

        assert!(sink.load("BP-1").is_err());
    }

    #[tokio::test]
    async fn save_replaces_previous_records() {
        let dir = TempDir::new().unwrap();
        let sink = FileResultSink::new(dir.path().join("results")).unwrap();

        assert!(
            sink.save("bp-1", &[record(1, 2008), record(2, 2009)])
                .await
                .unwrap()
        );
        assert!(sink.save("bp-1", &[record(3, 2010)]).await.unwrap());

        let stored = sink.load("bp-1").unwrap().unwrap();
        assert_eq!(stored.product_id, "bp-1");
        assert_eq!(stored.records, vec![record(3, 2010)]);
        assert!(!sink.path_for("bp-1").with_extension("json.tmp").exists());
        assert!(sink.load("other").unwrap().is_none());
    }
}
