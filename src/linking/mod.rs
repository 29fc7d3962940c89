//! Autolinking of record mentions
//!
//! Turns mentions of other lore records into links whenever a record is
//! written. Pure and synchronous: the caller supplies a `NameIndex` built
//! from the store and gets back the rewritten record.
//!
//! ## Pipeline
//!
//! ```text
//! name_id ──normalize──► index key
//! person  ──variants───► {"Nolen", "Nolen Silverbridge", ...}
//!
//! infobox  ── exact (lower-cased) value lookup ──┐
//! articles ── capitalized key substring scan ────┼─► replace_mentions ─► linkify
//!                                                │
//!                                   linked_records (ids, in visit order)
//! ```

pub mod articles;
pub mod index;
pub mod infobox;
pub mod linker;
pub mod matcher;
pub mod normalize;
pub mod rewrite;
pub mod variants;

pub use articles::walk_articles;
pub use index::{Excluded, IndexEntry, NameIndex};
pub use infobox::walk_infobox;
pub use linker::{insert_links, Linker};
pub use matcher::{longest_match, MentionMatch};
pub use normalize::{capitalize, normalize, normalize_opt};
pub use rewrite::{linkify, replace_mentions, LinkFormat};
pub use variants::{name_variants, variants};
