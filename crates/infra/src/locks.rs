//! Per-key mutual exclusion.
//!
//! The product store only promises atomic single-record writes, so a
//! fetch-validate-write sequence on one product must not interleave with
//! another on the same product. `KeyedLocks` hands out one mutex per key;
//! different keys never contend.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lazily-populated table of per-key mutexes.
///
/// An entry lives only while some caller holds or waits for its lock, so the
/// table is bounded by the number of in-flight callers, not by the number of
/// distinct keys ever seen.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// The guarded value is `()`, so a poisoned lock carries no broken state
    /// and is simply taken over.
    pub fn with_lock<T>(&self, key: &K, f: impl FnOnce() -> T) -> T {
        let slot = self.slot(key);
        let out = {
            let _guard: MutexGuard<'_, ()> = slot.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(key, slot);
        out
    }

    fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.entry(key.clone()).or_default().clone()
    }

    /// Give back our handle and drop the entry for `key` if it was the last one.
    ///
    /// Handles are cloned and dropped only under the table lock, so a count of
    /// one (the table's own) means nobody else holds or waits for the lock.
    fn release(&self, key: &K, slot: Arc<Mutex<()>>) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        drop(slot);
        if table.get(key).is_some_and(|s| Arc::strong_count(s) == 1) {
            table.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn same_key_is_serialized() {
        let locks = Arc::new(KeyedLocks::<u32>::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_seen = max_seen.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        locks.with_lock(&1, || {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            max_seen.fetch_max(now, Ordering::SeqCst);
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn one_slot_per_key_while_held() {
        let locks = KeyedLocks::<u32>::new();
        assert!(locks.is_empty());
        locks.with_lock(&1, || {
            assert_eq!(locks.len(), 1);
            locks.with_lock(&2, || assert_eq!(locks.len(), 2));
            assert_eq!(locks.len(), 1);
        });
        assert!(locks.is_empty());
    }

    #[test]
    fn idle_keys_are_evicted() {
        let locks = KeyedLocks::<u32>::new();
        for key in 0..10_000 {
            locks.with_lock(&key, || ());
        }
        assert!(locks.is_empty());
    }

    #[test]
    fn table_drains_after_contention() {
        let locks = Arc::new(KeyedLocks::<u32>::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let locks = locks.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        locks.with_lock(&((t + i) % 3), || thread::yield_now());
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(locks.is_empty());
    }

    #[test]
    fn returns_closure_value() {
        let locks = KeyedLocks::<&str>::new();
        assert_eq!(locks.with_lock(&"a", || 41 + 1), 42);
    }
}
