//! In-process store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{poisoned, KeyValueStore};
use crate::ScreenerResult;

/// Store backed by a `HashMap`. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ScreenerResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| poisoned("memory store"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ScreenerResult<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned("memory store"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
