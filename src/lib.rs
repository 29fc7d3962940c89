//! Lore wiki autolinking
//!
//! Rewrites lore records so that mentions of other records become links,
//! and records which records each one mentions.
//!
//! - [`linking`]: the pure linking core (normalization, Name Index,
//!   person name variants, mention matching, infobox and article walkers)
//! - [`store`]: record persistence and lore directory import
//! - [`service`]: create/update/relink flows tying the two together
//! - [`config`]: YAML configuration

pub mod config;
pub mod error;
pub mod linking;
pub mod service;
pub mod store;

pub use config::LinkerConfig;
pub use error::{ConfigError, LoreError, Result, StoreError};
pub use linking::{insert_links, LinkFormat, Linker, NameIndex};
pub use lore_types::{IndexRow, InfoboxNode, Record, RecordError, RecordId, RecordType};
pub use service::RecordService;
pub use store::{MemoryStore, RecordStore};
