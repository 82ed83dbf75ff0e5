//! Process-wide intern table for keys.
//!
//! The table exclusively owns every interned backing allocation; [`Key`]
//! values hold shared references into it. Entries are never evicted: the
//! table is append-only and lives for the process lifetime.
//!
//! Insertion is race-safe: two threads constructing the same key
//! concurrently both observe the single winning entry.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, RwLock};

use crate::key::KeyInner;

static TABLE: OnceLock<RwLock<HashMap<Box<str>, Arc<KeyInner>>>> = OnceLock::new();

fn table() -> &'static RwLock<HashMap<Box<str>, Arc<KeyInner>>> {
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Intern a validated (namespace, value) pair, returning the shared
/// backing instance.
///
/// Callers must have validated the components already; this only
/// canonicalizes and deduplicates.
pub(crate) fn intern(namespace: &str, value: &str) -> Arc<KeyInner> {
    let canonical = format!("{namespace}:{value}");

    // Fast path: already interned.
    {
        let guard = table().read().expect("key intern table poisoned");
        if let Some(existing) = guard.get(canonical.as_str()) {
            return Arc::clone(existing);
        }
    }

    let mut guard = table().write().expect("key intern table poisoned");
    // Re-check under the write lock: a racing thread may have inserted
    // between our read and write acquisitions. The earlier insert wins.
    if let Some(existing) = guard.get(canonical.as_str()) {
        return Arc::clone(existing);
    }

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);

    let inner = Arc::new(KeyInner {
        canonical: canonical.clone().into_boxed_str(),
        split: namespace.len(),
        hash: hasher.finish(),
    });
    guard.insert(canonical.into_boxed_str(), Arc::clone(&inner));
    inner
}

/// Number of distinct keys interned so far (diagnostics only).
pub fn size() -> usize {
    table().read().expect("key intern table poisoned").len()
}
