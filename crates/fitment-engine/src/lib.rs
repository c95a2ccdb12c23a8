#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod engine;

pub use crate::cache::TerminologyCache;
pub use crate::config::{DEFAULT_CACHE_CAPACITY, EngineConfig};
pub use crate::engine::MappingEngine;
