//! Visited-topic progress persisted in a key-value store.
//!
//! The stored document is a JSON object mapping tab ids to arrays of topic
//! ids, e.g. `{"transport":["monge","kantorovich"]}`. Persistence is
//! best-effort: unreadable documents load as empty.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::error::PageError;

/// Storage key holding the progress document.
pub const PROGRESS_KEY: &str = "villaniProgress";

/// Tab id → visited topic ids, in first-visit order.
pub type Progress = BTreeMap<String, Vec<String>>;

/// String key-value storage (browser local storage, or an in-memory map).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressStore<K> {
    store: K,
}

impl<K: KeyValueStore> ProgressStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn into_inner(self) -> K {
        self.store
    }

    /// Reads the current progress. Missing or malformed documents yield an
    /// empty mapping.
    pub fn load_progress(&self) -> Progress {
        let Some(raw) = self.store.get(PROGRESS_KEY) else {
            return Progress::new();
        };
        match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable progress document");
                Progress::new()
            }
        }
    }

    /// Records `topic` as visited under `tab` and writes the whole mapping back.
    ///
    /// A topic already listed for the tab is not added twice.
    pub fn save_progress(&mut self, tab: &str, topic: &str) -> Result<Progress, PageError> {
        let mut progress = self.load_progress();
        let visited = progress.entry(tab.to_owned()).or_default();
        if !visited.iter().any(|t| t == topic) {
            visited.push(topic.to_owned());
        }
        let doc = serde_json::to_string(&progress)?;
        self.store.set(PROGRESS_KEY, &doc)?;
        Ok(progress)
    }

    pub fn is_visited(&self, tab: &str, topic: &str) -> bool {
        self.load_progress()
            .get(tab)
            .is_some_and(|topics| topics.iter().any(|t| t == topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PageError> {
            Err(PageError::Storage("quota exceeded".into()))
        }
    }

    // ---- Loading ----

    #[test]
    fn missing_document_loads_empty() {
        let store = ProgressStore::new(MemoryStore::new());
        assert!(store.load_progress().is_empty());
    }

    #[test]
    fn malformed_document_loads_empty() {
        let store = ProgressStore::new(MemoryStore::with_entry(PROGRESS_KEY, "{not json"));
        assert!(store.load_progress().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let store = ProgressStore::new(MemoryStore::with_entry(PROGRESS_KEY, r#"{"a": 5}"#));
        assert!(store.load_progress().is_empty());
    }

    #[test]
    fn existing_document_is_read() {
        let store = ProgressStore::new(MemoryStore::with_entry(
            PROGRESS_KEY,
            r#"{"transport":["monge"]}"#,
        ));
        assert!(store.is_visited("transport", "monge"));
        assert!(!store.is_visited("transport", "kantorovich"));
        assert!(!store.is_visited("entropy", "monge"));
    }

    // ---- Recording ----

    #[test]
    fn save_progress_writes_full_mapping() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_progress("transport", "monge").unwrap();
        store.save_progress("entropy", "boltzmann").unwrap();
        let raw = store.store().get(PROGRESS_KEY).unwrap();
        assert_eq!(raw, r#"{"entropy":["boltzmann"],"transport":["monge"]}"#);
    }

    #[test]
    fn save_progress_deduplicates() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_progress("transport", "monge").unwrap();
        let progress = store.save_progress("transport", "monge").unwrap();
        assert_eq!(progress["transport"], vec!["monge".to_string()]);
    }

    #[test]
    fn save_progress_keeps_first_visit_order() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_progress("t", "b").unwrap();
        store.save_progress("t", "a").unwrap();
        assert_eq!(store.load_progress()["t"], vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn save_progress_replaces_malformed_document() {
        let mut store = ProgressStore::new(MemoryStore::with_entry(PROGRESS_KEY, "garbage"));
        store.save_progress("t", "x").unwrap();
        assert!(store.is_visited("t", "x"));
    }

    #[test]
    fn write_failure_is_reported() {
        let mut store = ProgressStore::new(FailingStore);
        assert!(matches!(store.save_progress("t", "x"), Err(PageError::Storage(_))));
    }

    #[test]
    fn boxed_store_forwards() {
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut store = ProgressStore::new(boxed);
        store.save_progress("t", "x").unwrap();
        assert!(store.is_visited("t", "x"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn no_duplicates_after_any_visit_sequence(
                visits in proptest::collection::vec((0usize..2, 0usize..4), 0..30),
            ) {
                let tabs = ["transport", "entropy"];
                let topics = ["a", "b", "c", "d"];
                let mut store = ProgressStore::new(MemoryStore::new());
                for (tab, topic) in visits {
                    store.save_progress(tabs[tab], topics[topic]).unwrap();
                }
                for visited in store.load_progress().values() {
                    let mut sorted = visited.clone();
                    sorted.sort();
                    sorted.dedup();
                    prop_assert_eq!(sorted.len(), visited.len());
                }
            }
        }
    }
}
