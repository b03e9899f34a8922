//! Single-flight dataset cache.
//!
//! Each dataset identifier owns a slot guarded by its own mutex. The first
//! caller for an identifier holds the slot lock while it ingests; concurrent
//! callers for the same identifier block on that lock and then read the
//! stored result, so a dataset is ingested at most once. Different
//! identifiers never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mhd_model::DatasetId;

use crate::pipeline::IngestedDataset;

type Slot = Arc<Mutex<Option<Arc<IngestedDataset>>>>;

/// Outcome of filling an empty slot.
#[derive(Debug)]
pub enum CacheFill {
    /// Store the dataset and reuse it for later calls.
    Store(Arc<IngestedDataset>),
    /// Return the dataset to this caller only and leave the slot empty.
    Transient(Arc<IngestedDataset>),
}

/// Process-lifetime store of ingested datasets, written once per identifier.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<DatasetId, Slot>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored dataset, waiting for an in-flight ingestion of the
    /// same identifier to finish.
    pub fn get(&self, dataset: &DatasetId) -> Option<Arc<IngestedDataset>> {
        let slot = self.slots().get(dataset).cloned()?;
        let guard = lock(&slot);
        guard.clone()
    }

    /// Returns true if a dataset is stored for the identifier.
    pub fn contains(&self, dataset: &DatasetId) -> bool {
        self.get(dataset).is_some()
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots().values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the stored dataset or runs `fill` to produce it.
    ///
    /// Only one `fill` runs at a time per identifier. A
    /// [`CacheFill::Transient`] result is handed back without being stored,
    /// so the next caller runs `fill` again.
    pub fn get_or_fill<F>(&self, dataset: &DatasetId, fill: F) -> Arc<IngestedDataset>
    where
        F: FnOnce() -> CacheFill,
    {
        let slot = Arc::clone(self.slots().entry(dataset.clone()).or_default());
        let mut guard = lock(&slot);
        if let Some(stored) = guard.as_ref() {
            tracing::debug!(dataset = %dataset, "cache hit");
            return Arc::clone(stored);
        }
        match fill() {
            CacheFill::Store(ingested) => {
                *guard = Some(Arc::clone(&ingested));
                ingested
            }
            CacheFill::Transient(ingested) => {
                tracing::debug!(dataset = %dataset, "result not cached");
                ingested
            }
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<DatasetId, Slot>> {
        lock(&self.slots)
    }
}

/// Slots only ever hold complete values, so a poisoned lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::DataOrigin;

    fn dataset(name: &str) -> Arc<IngestedDataset> {
        Arc::new(IngestedDataset::new(
            DatasetId::new(name),
            DataOrigin::Synthetic,
            Vec::new(),
        ))
    }

    #[test]
    fn test_store_then_hit() {
        let cache = DatasetCache::new();
        let id = DatasetId::new("a");
        let first = cache.get_or_fill(&id, || CacheFill::Store(dataset("a")));
        let second = cache.get_or_fill(&id, || panic!("must not refill"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_transient_is_not_stored() {
        let cache = DatasetCache::new();
        let id = DatasetId::new("a");
        cache.get_or_fill(&id, || CacheFill::Transient(dataset("a")));
        assert!(!cache.contains(&id));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_unknown() {
        assert!(DatasetCache::new().get(&DatasetId::new("x")).is_none());
    }
}
