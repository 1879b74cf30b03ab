//! Key-value + set-membership store for persisted progression
//!
//! The simulation and storefront only see the [`StatePort`] trait; the
//! concrete backing (JSON file on disk, plain memory in tests or when the
//! disk store cannot be opened) is chosen by the frontend. Every operation
//! returns an explicit `Result` so callers decide, visibly, whether a
//! failure is defaulted away or propagated.

pub mod json_store;
pub mod memory;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

use std::collections::BTreeSet;
use std::fmt;

/// Persisted keys and set names
pub mod keys {
    pub const HIGH_SCORE: &str = "high_score";
    pub const COINS: &str = "coins";
    pub const CURRENT_SKIN: &str = "current_skin";
    pub const OWNED_SKINS: &str = "owned_skins";
}

/// Store failure. None of these are fatal to the game; the in-memory
/// state stays authoritative for the rest of the session.
#[derive(Debug)]
pub enum StoreError {
    /// The backing store could not be opened or created
    Unavailable(String),
    /// A read or write against the backing store failed
    Io(std::io::Error),
    /// The store file exists but could not be parsed
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(why) => write!(f, "store unavailable: {why}"),
            StoreError::Io(err) => write!(f, "store I/O error: {err}"),
            StoreError::Corrupt(why) => write!(f, "store data corrupt: {why}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

/// Persistence port consumed by the simulation, bird, and storefront.
///
/// Writes are synchronous and best-effort: callers log and drop a failed
/// write rather than retrying.
pub trait StatePort {
    /// Read an integer key, falling back to `default` when absent
    fn get_int(&self, key: &str, default: u32) -> Result<u32, StoreError>;
    fn set_int(&mut self, key: &str, value: u32) -> Result<(), StoreError>;

    /// Read a string key, `None` when absent
    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_str(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Insert a member into a named set (idempotent)
    fn add_to_set(&mut self, collection: &str, member: &str) -> Result<(), StoreError>;
    fn get_set(&self, collection: &str) -> Result<BTreeSet<String>, StoreError>;
}
