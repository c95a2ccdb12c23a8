#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loaders;
pub mod manifest;
pub mod memory;
pub mod registry;
pub mod sink;
pub mod traits;

pub use crate::error::CatalogError;
pub use crate::memory::{InMemoryMappingStore, InMemoryPositionCatalog, InMemoryVehicleCatalog};
pub use crate::registry::{CatalogRegistry, LoadSummary};
pub use crate::sink::{FileResultSink, StoredFitmentResults};
pub use crate::traits::{FitmentResultSink, ModelMappingStore, PositionCatalog, VehicleCatalog};
