//! In-memory store - used by tests and as the fallback when the disk
//! store cannot be opened. Never fails.

use std::collections::{BTreeMap, BTreeSet};

use super::{StatePort, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    ints: BTreeMap<String, u32>,
    strings: BTreeMap<String, String>,
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatePort for MemoryStore {
    fn get_int(&self, key: &str, default: u32) -> Result<u32, StoreError> {
        Ok(self.ints.get(key).copied().unwrap_or(default))
    }

    fn set_int(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.ints.insert(key.to_string(), value);
        Ok(())
    }

    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.strings.get(key).cloned())
    }

    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn add_to_set(&mut self, collection: &str, member: &str) -> Result<(), StoreError> {
        self.sets
            .entry(collection.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    fn get_set(&self, collection: &str) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.sets.get(collection).cloned().unwrap_or_default())
    }
}
