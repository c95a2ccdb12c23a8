use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use fitment_model::{FitmentError, Result};

/// Default number of terminologies kept in the cache.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(127);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on cached terminologies (and on their position lists).
    pub cache_capacity: NonZeroUsize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Builds a config with the given cache capacity.
    ///
    /// # Errors
    ///
    /// Returns [`FitmentError::Configuration`] when `capacity` is zero.
    pub fn with_cache_capacity(capacity: usize) -> Result<Self> {
        let cache_capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            FitmentError::configuration("cache capacity must be at least 1")
        })?;
        Ok(Self { cache_capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity() {
        assert_eq!(EngineConfig::default().cache_capacity.get(), 128);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(EngineConfig::with_cache_capacity(0).is_err());
        assert_eq!(
            EngineConfig::with_cache_capacity(4)
                .unwrap()
                .cache_capacity
                .get(),
            4
        );
    }
}
