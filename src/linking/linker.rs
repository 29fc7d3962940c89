//! Record linker
//!
//! Entry point of the linking pipeline:
//!
//! ```text
//! Record + NameIndex
//!         │
//!         ├─► hold out the record's own index entry (no self-links)
//!         ├─► walk_infobox  ──► infobox', ids_a
//!         ├─► walk_articles ──► articles', ids_b
//!         ├─► linked_records = ids_a ++ ids_b
//!         └─► own entry restored (guard drop)
//! ```

use lore_types::Record;

use super::articles::walk_articles;
use super::index::NameIndex;
use super::infobox::walk_infobox;
use super::normalize::normalize;
use super::rewrite::LinkFormat;
use crate::config::LinkerConfig;

/// Inserts links to other records into a record
#[derive(Debug, Clone, Default)]
pub struct Linker {
    format: LinkFormat,
}

impl Linker {
    pub fn new(format: LinkFormat) -> Self {
        Self { format }
    }

    pub fn from_config(config: &LinkerConfig) -> Self {
        Self::new(LinkFormat::new(config.href_prefix.clone()))
    }

    pub fn format(&self) -> &LinkFormat {
        &self.format
    }

    /// Replace mentions of other records in `record` with links.
    ///
    /// The record's own entry is held out of `index` for the duration of
    /// the call and put back afterwards; the index is otherwise unchanged.
    pub fn insert_links(&self, mut record: Record, index: &mut NameIndex) -> Record {
        let own_key = normalize(&record.name_id);
        let view = index.exclude(own_key);

        let (infobox, mut linked) = walk_infobox(&record.infobox, &view, &self.format);
        let (articles, article_links) = walk_articles(&record.articles, &view, &self.format);
        linked.extend(article_links);

        tracing::debug!(
            name_id = %record.name_id,
            self_excluded = view.removed().is_some(),
            linked = linked.len(),
            "Links inserted"
        );
        drop(view);

        record.infobox = infobox;
        record.articles = articles;
        record.linked_records = linked;
        record
    }
}

/// `Linker::insert_links` with the default link format
pub fn insert_links(record: Record, index: &mut NameIndex) -> Record {
    Linker::default().insert_links(record, index)
}
