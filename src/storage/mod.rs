//! Key-value persistence with a local-storage style contract:
//! string keys mapped to string values, read and written whole.

pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over backends able to hold the ledger's key-value profile.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
