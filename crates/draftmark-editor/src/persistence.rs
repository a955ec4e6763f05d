//! Persistence boundary: saving and loading snapshots in a key-value store.

use crate::error::{EditorError, Result};
use crate::snapshot;
use draftmark_model::ContentState;
use std::collections::HashMap;

/// A string key-value store such as browser local storage.
pub trait KeyValueStore {
    /// Whether the store can be used at all.
    fn is_available(&self) -> bool {
        true
    }

    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store backed by a map.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    available: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            available: true,
            fail_writes: false,
        }
    }

    /// A store that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A store that rejects every write, e.g. when the quota is exhausted.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if !self.available {
            return Err(EditorError::StoreUnavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.available {
            return Err(EditorError::StoreUnavailable);
        }
        if self.fail_writes {
            return Err(EditorError::SaveFailure("quota exceeded".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialize `content` and write it under `key`.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, content: &ContentState) -> Result<()> {
    if !store.is_available() {
        return Err(EditorError::StoreUnavailable);
    }
    let json = snapshot::to_json(content).map_err(|e| EditorError::SaveFailure(e.to_string()))?;
    store.set_item(key, &json).map_err(|e| match e {
        EditorError::StoreUnavailable | EditorError::SaveFailure(_) => e,
        other => EditorError::SaveFailure(other.to_string()),
    })
}

/// Read and decode the snapshot under `key`, if one is stored.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<ContentState>> {
    if !store.is_available() {
        return Err(EditorError::StoreUnavailable);
    }
    match store.get_item(key)? {
        Some(json) => snapshot::from_json(&json).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftmark_model::{Block, BlockType};

    fn sample() -> ContentState {
        ContentState::from_blocks(vec![Block::new("a".into(), BlockType::HeaderOne, "Saved")])
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, "doc", &sample()).unwrap();
        assert_eq!(store.len(), 1);

        let loaded = load(&store, "doc").unwrap().unwrap();
        assert_eq!(loaded.first_block().text(), "Saved");
        assert_eq!(loaded.first_block().block_type(), BlockType::HeaderOne);
    }

    #[test]
    fn test_load_missing_key() {
        assert!(load(&MemoryStore::new(), "doc").unwrap().is_none());
    }

    #[test]
    fn test_unavailable_store() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(save(&mut store, "doc", &sample()), Err(EditorError::StoreUnavailable));
        assert_eq!(load(&store, "doc").unwrap_err(), EditorError::StoreUnavailable);
    }

    #[test]
    fn test_failing_write() {
        let mut store = MemoryStore::failing_writes();
        assert!(matches!(
            save(&mut store, "doc", &sample()),
            Err(EditorError::SaveFailure(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_stored_value() {
        let mut store = MemoryStore::new();
        store.set_item("doc", "{\"blocks\": 7}").unwrap();
        assert!(matches!(load(&store, "doc"), Err(EditorError::MalformedSnapshot(_))));
    }
}
