//! In-memory memo of resolved trim specs.
//!
//! Keyed by normalized (year, make, model, trim). No TTL and no eviction:
//! the working set is one form session, and a changed key is a new entry.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use crate::models::TrimSpecs;

/// Cache key. Fields are trimmed and lower-cased on construction so
/// "BMW"/"bmw " hit the same entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SpecKey {
    year: String,
    make: String,
    model: String,
    trim: String,
}

impl SpecKey {
    pub fn new(year: &str, make: &str, model: &str, trim: &str) -> Self {
        let normalize = |value: &str| {
            value
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        };
        Self {
            year: normalize(year),
            make: normalize(make),
            model: normalize(model),
            trim: normalize(trim),
        }
    }
}

/// Concurrent reads, exclusive writes.
#[derive(Debug, Default)]
pub struct SpecCache {
    entries: RwLock<HashMap<SpecKey, TrimSpecs>>,
}

impl SpecCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read lock, recovering from poison. Entries are plain values, so a
    /// panic mid-write cannot leave one half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SpecKey, TrimSpecs>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!("Spec cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SpecKey, TrimSpecs>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("Spec cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Cached specs for a key. A miss is `None`, not an error.
    pub fn get(&self, key: &SpecKey) -> Option<TrimSpecs> {
        let hit = self.read().get(key).cloned();
        debug!(
            "Spec cache {} for {:?}",
            if hit.is_some() { "hit" } else { "miss" },
            key
        );
        hit
    }

    /// Store specs for a key, replacing any previous entry.
    pub fn put(&self, key: SpecKey, specs: TrimSpecs) {
        self.write().insert(key, specs);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn specs() -> TrimSpecs {
        TrimSpecs::new("3.0L I6 Twin-Turbo", "6-Speed Manual", "RWD")
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = SpecCache::new();
        let key = SpecKey::new("2023", "BMW", "3 Series", "M3");

        assert_eq!(cache.get(&key), None);
        cache.put(key.clone(), specs());
        assert_eq!(cache.get(&key), Some(specs()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_is_normalized() {
        let cache = SpecCache::new();
        cache.put(SpecKey::new("2023", "BMW", "3 Series", "M3"), specs());

        let same = SpecKey::new(" 2023", "bmw", "3  SERIES ", "m3");
        assert_eq!(cache.get(&same), Some(specs()));

        let other_trim = SpecKey::new("2023", "BMW", "3 Series", "M3 Competition");
        assert_eq!(cache.get(&other_trim), None);
    }

    #[test]
    fn test_put_replaces() {
        let cache = SpecCache::new();
        let key = SpecKey::new("2021", "Toyota", "Camry", "SE");
        cache.put(key.clone(), TrimSpecs::new("2.5L I4", "", ""));
        cache.put(key.clone(), specs());
        assert_eq!(cache.get(&key), Some(specs()));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(SpecCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let key = SpecKey::new("2020", "Honda", "Civic", &format!("T{}", i));
                    cache.put(key, specs());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
