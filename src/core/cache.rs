//! Namespaced key/value cache over the host's persistent storage.
//!
//! Each cache owns one storage key (the namespace prefix) holding a single
//! JSON object; logical properties live inside it and every access is a
//! whole-object round trip.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("value serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The host's persistent string storage seam (the localStorage contract).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// A namespaced cache: one JSON blob under `prefix`, read and written
/// whole. A malformed blob degrades to empty rather than erroring.
pub struct LocalCache<S: KeyValueStore> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> LocalCache<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> LocalCache<S> {
        LocalCache {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Read one property, falling back to `default` when the property is
    /// absent, null, the wrong shape, or the whole blob is unreadable.
    pub fn get<V: DeserializeOwned>(&self, property: &str, default: V) -> V {
        let blob = self.read_namespace();
        match blob.get(property) {
            None | Some(Value::Null) => default,
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                log::debug!("cache {:?}.{:?} has unexpected shape: {}", self.prefix, property, e);
                default
            }),
        }
    }

    /// Write one property via a whole-blob read-modify-write.
    ///
    /// Not atomic across script instances sharing the store: concurrent
    /// writers to the same namespace race at whole-blob granularity and
    /// the last writer wins, dropping the other's property updates.
    pub fn set<V: Serialize>(&mut self, property: &str, value: V) -> Result<(), CacheError> {
        let mut blob = self.read_namespace();
        blob.insert(property.to_string(), serde_json::to_value(value)?);
        let serialized = serde_json::to_string(&Value::Object(blob))?;
        self.store.set_item(&self.prefix, &serialized);
        Ok(())
    }

    /// Remove one property; absent properties are a no-op.
    pub fn remove(&mut self, property: &str) -> Result<(), CacheError> {
        let mut blob = self.read_namespace();
        if blob.remove(property).is_some() {
            let serialized = serde_json::to_string(&Value::Object(blob))?;
            self.store.set_item(&self.prefix, &serialized);
        }
        Ok(())
    }

    fn read_namespace(&self) -> Map<String, Value> {
        let Some(raw) = self.store.get_item(&self.prefix) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                log::debug!("cache namespace {:?} is not a JSON object; starting empty", self.prefix);
                Map::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[derive(Default)]
    struct MemoryStore {
        items: FxHashMap<String, String>,
    }

    impl KeyValueStore for MemoryStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.get(key).cloned()
        }

        fn set_item(&mut self, key: &str, value: &str) {
            self.items.insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn round_trip() {
        let mut cache = LocalCache::new(MemoryStore::default(), "mymod");
        cache.set("a", 1).unwrap();
        assert_eq!(cache.get("a", 0), 1);
    }

    #[test]
    fn missing_key_yields_default() {
        let cache = LocalCache::new(MemoryStore::default(), "mymod");
        assert_eq!(cache.get("missing-key", 42), 42);
    }

    #[test]
    fn null_property_yields_default() {
        let mut store = MemoryStore::default();
        store.set_item("mymod", r#"{"a":null}"#);
        let cache = LocalCache::new(store, "mymod");
        assert_eq!(cache.get("a", 7), 7);
    }

    #[test]
    fn wrong_shape_yields_default() {
        let mut cache = LocalCache::new(MemoryStore::default(), "mymod");
        cache.set("a", "not a number").unwrap();
        assert_eq!(cache.get("a", 5), 5);
    }

    #[test]
    fn corrupt_blob_degrades_to_empty() {
        let mut store = MemoryStore::default();
        store.set_item("mymod", "{{{{ definitely not json");
        let mut cache = LocalCache::new(store, "mymod");
        assert_eq!(cache.get("a", 3), 3);
        // Writing over a corrupt blob starts fresh instead of erroring.
        cache.set("a", 8).unwrap();
        assert_eq!(cache.get("a", 0), 8);
    }

    #[test]
    fn properties_are_independent() {
        let mut cache = LocalCache::new(MemoryStore::default(), "mymod");
        cache.set("a", 1).unwrap();
        cache.set("b", vec!["x".to_string()]).unwrap();
        assert_eq!(cache.get("a", 0), 1);
        assert_eq!(cache.get("b", Vec::<String>::new()), vec!["x".to_string()]);
    }

    #[test]
    fn namespaces_do_not_collide() {
        let mut first = LocalCache::new(MemoryStore::default(), "mod-one");
        first.set("a", 1).unwrap();
        let second = LocalCache::new(MemoryStore::default(), "mod-two");
        assert_eq!(second.get("a", 0), 0);
    }

    #[test]
    fn remove_deletes_property() {
        let mut cache = LocalCache::new(MemoryStore::default(), "mymod");
        cache.set("a", 1).unwrap();
        cache.remove("a").unwrap();
        assert_eq!(cache.get("a", 0), 0);
    }

    #[test]
    fn structured_values_round_trip() {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Settings {
            volume: u8,
            emotes: Vec<String>,
        }
        let settings = Settings {
            volume: 80,
            emotes: vec!["wave".to_string(), "bow".to_string()],
        };
        let mut cache = LocalCache::new(MemoryStore::default(), "mymod");
        cache.set("settings", settings.clone()).unwrap();
        let fallback = Settings {
            volume: 0,
            emotes: vec![],
        };
        assert_eq!(cache.get("settings", fallback), settings);
    }
}
