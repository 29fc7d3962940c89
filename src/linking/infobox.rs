//! Infobox rewriting
//!
//! Walks the infobox tree and links text leaves whose whole (lower-cased)
//! value is an index key. Unlike articles, leaves are not scanned for
//! substrings.

use lore_types::{InfoboxNode, RecordId};

use super::index::NameIndex;
use super::rewrite::{replace_mentions, LinkFormat};

/// Rewrite an infobox tree, returning the new tree and the ids it links to.
///
/// Numbers and flags come back as text; `Empty` stays empty. The input
/// tree and the index are left untouched.
pub fn walk_infobox(
    node: &InfoboxNode,
    index: &NameIndex,
    format: &LinkFormat,
) -> (InfoboxNode, Vec<RecordId>) {
    let mut linked = Vec::new();
    let rewritten = walk_node(node, index, format, &mut linked);
    (rewritten, linked)
}

fn walk_node(
    node: &InfoboxNode,
    index: &NameIndex,
    format: &LinkFormat,
    linked: &mut Vec<RecordId>,
) -> InfoboxNode {
    match node {
        InfoboxNode::Mapping(map) => InfoboxNode::Mapping(
            map.iter()
                .map(|(key, value)| (key.clone(), walk_node(value, index, format, linked)))
                .collect(),
        ),
        InfoboxNode::Sequence(items) => InfoboxNode::Sequence(
            items
                .iter()
                .map(|item| walk_node(item, index, format, linked))
                .collect(),
        ),
        InfoboxNode::Text(text) => {
            let word = text.to_lowercase();
            match index.get(&word) {
                None => InfoboxNode::Text(text.clone()),
                Some(entry) => {
                    tracing::trace!(value = %text, target = %entry.name_id, "Infobox value linked");
                    linked.push(entry.id);
                    InfoboxNode::Text(replace_mentions(&word, &word, entry, format))
                }
            }
        }
        InfoboxNode::Number(number) => InfoboxNode::Text(number.to_string()),
        InfoboxNode::Flag(flag) => InfoboxNode::Text(flag.to_string()),
        InfoboxNode::Empty => InfoboxNode::Empty,
    }
}
