//! Record write flows
//!
//! Every write links the incoming record against a Name Index built fresh
//! from the store, then persists the linked result.

use std::sync::Arc;

use lore_types::{Record, RecordId};
use tracing::info;

use crate::error::Result;
use crate::linking::{Linker, NameIndex};
use crate::store::RecordStore;

/// Creates, updates and relinks records against a `RecordStore`
pub struct RecordService<S: RecordStore + ?Sized> {
    store: Arc<S>,
    linker: Linker,
}

impl<S: RecordStore + ?Sized> RecordService<S> {
    pub fn new(store: Arc<S>, linker: Linker) -> Self {
        Self { store, linker }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    /// Name Index over the current store contents
    pub async fn name_index(&self) -> Result<NameIndex> {
        let rows = self.store.index_rows().await?;
        Ok(NameIndex::build(rows))
    }

    /// Link `record` against the store without persisting it
    pub async fn preview(&self, record: Record) -> Result<Record> {
        record.validate()?;
        let mut index = self.name_index().await?;
        Ok(self.linker.insert_links(record, &mut index))
    }

    /// Validate, link and store a new record
    pub async fn create(&self, record: Record) -> Result<RecordId> {
        let linked = self.preview(record).await?;
        let name_id = linked.name_id.clone();
        let id = self.store.insert(linked).await?;
        info!(%id, name_id = %name_id, "Record created");
        Ok(id)
    }

    /// Validate, link and overwrite the record stored under `id`
    pub async fn update(&self, id: RecordId, record: Record) -> Result<()> {
        let linked = self.preview(record).await?;
        let linked_count = linked.linked_records.len();
        self.store.replace(id, linked).await?;
        info!(%id, linked = linked_count, "Record updated");
        Ok(())
    }

    /// Relink every stored record against one index snapshot.
    ///
    /// Returns the number of records rewritten.
    pub async fn relink_all(&self) -> Result<usize> {
        let mut index = self.name_index().await?;
        let mut count = 0;

        for record in self.store.list().await? {
            let Some(id) = record.id else {
                continue;
            };
            let linked = self.linker.insert_links(record, &mut index);
            self.store.replace(id, linked).await?;
            count += 1;
        }

        info!(count, "Relinked all records");
        Ok(count)
    }
}
