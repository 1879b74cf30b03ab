//! JSON-file-backed store
//!
//! One JSON document in the per-user data directory holds the whole
//! economy record. Writes go through a tmp file + rename so a crash
//! mid-write cannot truncate the previous save.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::{StatePort, StoreError};

/// On-disk document shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDoc {
    #[serde(default)]
    ints: BTreeMap<String, u32>,
    #[serde(default)]
    strings: BTreeMap<String, String>,
    #[serde(default)]
    sets: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    doc: StoreDoc,
}

impl JsonStore {
    /// Open (or create) the store in the per-user data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("io", "featherfall", "featherfall")
            .ok_or_else(|| StoreError::Unavailable("no home directory".to_string()))?;
        let dir = dirs.data_local_dir();
        fs::create_dir_all(dir)?;
        Self::open(dir.join("progress.json"))
    }

    /// Open (or create) a store at an explicit path.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let doc = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| StoreError::Corrupt(err.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreDoc::default(),
            Err(err) => return Err(err.into()),
        };
        log::info!("opened progression store at {}", path.display());
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_out(&self) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&self.doc)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StatePort for JsonStore {
    fn get_int(&self, key: &str, default: u32) -> Result<u32, StoreError> {
        Ok(self.doc.ints.get(key).copied().unwrap_or(default))
    }

    fn set_int(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.doc.ints.insert(key.to_string(), value);
        self.write_out()
    }

    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.doc.strings.get(key).cloned())
    }

    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.doc.strings.insert(key.to_string(), value.to_string());
        self.write_out()
    }

    fn add_to_set(&mut self, collection: &str, member: &str) -> Result<(), StoreError> {
        let inserted = self
            .doc
            .sets
            .entry(collection.to_string())
            .or_default()
            .insert(member.to_string());
        if inserted { self.write_out() } else { Ok(()) }
    }

    fn get_set(&self, collection: &str) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.doc.sets.get(collection).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("featherfall-test-{tag}-{}.json", std::process::id()));
        path
    }

    #[test]
    fn test_reload_roundtrip() {
        let path = temp_store_path("roundtrip");
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonStore::open(path.clone()).unwrap();
            store.set_int("coins", 75).unwrap();
            store.set_int("high_score", 12).unwrap();
            store.set_str("current_skin", "ninja").unwrap();
            store.add_to_set("owned_skins", "default").unwrap();
            store.add_to_set("owned_skins", "ninja").unwrap();
        }

        let store = JsonStore::open(path.clone()).unwrap();
        assert_eq!(store.get_int("coins", 0).unwrap(), 75);
        assert_eq!(store.get_int("high_score", 0).unwrap(), 12);
        assert_eq!(store.get_str("current_skin").unwrap().as_deref(), Some("ninja"));
        let owned = store.get_set("owned_skins").unwrap();
        assert!(owned.contains("default") && owned.contains("ninja"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = temp_store_path("fresh");
        let _ = fs::remove_file(&path);
        let store = JsonStore::open(path.clone()).unwrap();
        assert_eq!(store.get_int("coins", 0).unwrap(), 0);
        assert!(store.get_str("current_skin").unwrap().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = temp_store_path("corrupt");
        fs::write(&path, b"not json {").unwrap();
        match JsonStore::open(path.clone()) {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("expected Corrupt error, got {other:?}"),
        }
        let _ = fs::remove_file(&path);
    }
}
