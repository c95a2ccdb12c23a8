//! Bounded terminology cache.
//!
//! Terminologies and their resolved position lists are cached per engine
//! instance. Entries never expire on their own; callers invalidate through
//! [`TerminologyCache::clear`].

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use fitment_model::{PartTerminology, PcdbPosition};

pub struct TerminologyCache {
    terminologies: Mutex<LruCache<u32, PartTerminology>>,
    positions: Mutex<LruCache<u32, Vec<PcdbPosition>>>,
    capacity: NonZeroUsize,
}

impl TerminologyCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            terminologies: Mutex::new(LruCache::new(capacity)),
            positions: Mutex::new(LruCache::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn terminology(&self, id: u32) -> Option<PartTerminology> {
        lock(&self.terminologies).get(&id).cloned()
    }

    pub fn insert_terminology(&self, terminology: PartTerminology) {
        lock(&self.terminologies).put(terminology.id, terminology);
    }

    pub fn positions(&self, terminology_id: u32) -> Option<Vec<PcdbPosition>> {
        lock(&self.positions).get(&terminology_id).cloned()
    }

    pub fn insert_positions(&self, terminology_id: u32, positions: Vec<PcdbPosition>) {
        lock(&self.positions).put(terminology_id, positions);
    }

    /// Number of cached terminologies.
    pub fn len(&self) -> usize {
        lock(&self.terminologies).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.terminologies).clear();
        lock(&self.positions).clear();
    }
}

impl fmt::Debug for TerminologyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminologyCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

// A panic while holding the lock cannot leave an LRU entry half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminology(id: u32) -> PartTerminology {
        PartTerminology {
            id,
            name: format!("Part {id}"),
            category_id: 1,
            subcategory_id: 1,
            valid_positions: vec![1],
        }
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = TerminologyCache::new(NonZeroUsize::new(2).unwrap());
        cache.insert_terminology(terminology(1));
        cache.insert_terminology(terminology(2));
        assert!(cache.terminology(1).is_some());
        cache.insert_terminology(terminology(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.terminology(2).is_none());
        assert!(cache.terminology(1).is_some());
        assert!(cache.terminology(3).is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let cache = TerminologyCache::new(NonZeroUsize::new(4).unwrap());
        cache.insert_terminology(terminology(1));
        cache.insert_positions(1, Vec::new());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.positions(1).is_none());
    }
}
