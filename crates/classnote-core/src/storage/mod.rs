//! Persistence backends for board documents.

pub mod autosave;
pub mod memory;
pub mod persist;

pub use autosave::{Autosave, SAVE_DEBOUNCE};
pub use memory::MemoryStore;
pub use persist::{LoadReport, ResetReason, SCHEMA_VERSION, board_key, decode_document, encode_document};

use thiserror::Error;

/// Errors a key-value backend can surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the write because it is out of space.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage, the board's only persistence dependency.
///
/// Hosts adapt whatever they have (browser local storage, a file, a
/// server table) behind this trait. Writes replace the whole value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
