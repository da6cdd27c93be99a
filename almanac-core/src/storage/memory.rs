use std::collections::HashMap;

use crate::error::AlmanacResult;
use crate::storage::KeyValueStore;

/// In-memory storage that forgets everything on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AlmanacResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
