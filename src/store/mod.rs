//! Record store abstraction
//!
//! The linker never talks to persistence directly; write flows go through
//! `RecordStore`, which supplies the index projection and takes the linked
//! records back. `MemoryStore` is the in-process implementation used by
//! the CLI and tests.

use async_trait::async_trait;
use lore_types::{IndexRow, Record, RecordId};

use crate::error::StoreError;

pub mod lore_dir;
pub mod memory;

pub use lore_dir::{import_lore_dir, read_lore_dir, read_lore_file, write_lore_file, ImportSummary};
pub use memory::MemoryStore;

/// Persistence for lore records
///
/// Implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Projection of every stored record, in insertion order
    async fn index_rows(&self) -> Result<Vec<IndexRow>, StoreError>;

    /// All stored records, in insertion order
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError>;

    async fn find_by_name_id(&self, name_id: &str) -> Result<Option<Record>, StoreError>;

    /// Store a new record and return its id.
    ///
    /// Assigns an id when the record has none. Fails when the `name_id` is
    /// already taken.
    async fn insert(&self, record: Record) -> Result<RecordId, StoreError>;

    /// Overwrite the record stored under `id`
    async fn replace(&self, id: RecordId, record: Record) -> Result<(), StoreError>;
}
