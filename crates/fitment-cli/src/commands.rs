use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use fitment_catalog::loaders::parse_mapping_json;
use fitment_catalog::{CatalogRegistry, FileResultSink, InMemoryMappingStore, ModelMappingStore};
use fitment_cli::input::read_applications;
use fitment_engine::{EngineConfig, MappingEngine};
use fitment_map::ModelMappingTable;
use fitment_model::{ValidationResult, ValidationSummary};

use crate::cli::{BatchArgs, CatalogArgs, ProcessArgs};

/// Where fitments from a batch were saved.
pub struct SavedResults {
    pub product_id: String,
    pub output_dir: PathBuf,
    pub records: usize,
}

pub struct BatchOutcome {
    pub results: BTreeMap<String, Vec<ValidationResult>>,
    pub summary: ValidationSummary,
    pub saved: Option<SavedResults>,
}

pub async fn run_process(args: &ProcessArgs) -> Result<Vec<ValidationResult>> {
    let engine = build_engine(&args.catalog, None).await?;
    let results = engine
        .process_application(&args.text, args.terminology)
        .await
        .with_context(|| format!("process '{}'", args.text))?;
    Ok(results)
}

pub async fn run_batch(args: &BatchArgs) -> Result<BatchOutcome> {
    let texts = read_applications(&args.input)?;
    info!(input = %args.input.display(), applications = texts.len(), "applications read");
    let engine = build_engine(&args.catalog, args.output.as_deref()).await?;

    let progress = progress_bar(texts.len());
    let results = engine
        .batch_process_with(&texts, args.terminology, |text, _| {
            progress.set_message(text.to_string());
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    let summary = ValidationSummary::from_results(results.values().flatten());
    info!(
        applications = results.len(),
        valid = summary.valid,
        warnings = summary.warnings,
        errors = summary.errors,
        "batch complete"
    );

    let saved = match (&args.product, &args.output) {
        (Some(product_id), Some(output_dir)) => {
            let all: Vec<ValidationResult> = results.values().flatten().cloned().collect();
            let records = engine
                .save_mapping_results(product_id, &all)
                .await
                .context("save mapping results")?;
            Some(SavedResults {
                product_id: product_id.clone(),
                output_dir: output_dir.clone(),
                records,
            })
        }
        _ => None,
    };

    Ok(BatchOutcome {
        results,
        summary,
        saved,
    })
}

pub async fn run_mappings(args: &CatalogArgs) -> Result<ModelMappingTable> {
    let engine = build_engine(args, None).await?;
    engine
        .mapping_table()
        .context("engine has no model mappings configured")
}

/// Loads the catalog, seeds a mapping store from the mapping document and
/// configures an engine from it.
async fn build_engine(args: &CatalogArgs, output_dir: Option<&Path>) -> Result<MappingEngine> {
    let registry = CatalogRegistry::load(&args.catalog)
        .with_context(|| format!("load catalog {}", args.catalog.display()))?;

    let config = match registry.cache_capacity() {
        Some(capacity) => EngineConfig::with_cache_capacity(capacity)?,
        None => EngineConfig::default(),
    };

    let document = match &args.mappings {
        Some(path) => parse_mapping_json(path)
            .with_context(|| format!("load model mappings {}", path.display()))?,
        None => registry.model_mappings.clone().context(
            "no model mappings: pass --mappings or list a model_mappings file in catalog.toml",
        )?,
    };
    let store = Arc::new(InMemoryMappingStore::new());
    let imported = store.import_document(&document).await?;

    let mut engine = MappingEngine::with_config(
        Arc::new(registry.vehicle_catalog()),
        Arc::new(registry.position_catalog()),
        config,
    )
    .with_store(store);
    if let Some(dir) = output_dir {
        let sink = FileResultSink::new(dir)
            .with_context(|| format!("open output directory {}", dir.display()))?;
        engine = engine.with_sink(Arc::new(sink));
    }

    let patterns = engine.configure_from_store().await?;
    info!(rules = imported, patterns, "engine configured");
    Ok(engine)
}

fn progress_bar(len: usize) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
    {
        progress.set_style(style.progress_chars("=> "));
    }
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}
