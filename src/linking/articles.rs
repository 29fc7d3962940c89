//! Article rewriting
//!
//! Every article body is checked against every index entry, in key order.
//! An entry applies when its capitalized key occurs in the current text;
//! each application works on the output of the previous one.

use std::collections::BTreeMap;

use lore_types::RecordId;

use super::index::NameIndex;
use super::normalize::capitalize;
use super::rewrite::{replace_mentions, LinkFormat};

/// Rewrite all articles, returning the new articles and the ids linked.
///
/// An id is recorded each time its entry is applied and the article then
/// holds a link to it, so the same id can appear more than once.
pub fn walk_articles(
    articles: &BTreeMap<String, String>,
    index: &NameIndex,
    format: &LinkFormat,
) -> (BTreeMap<String, String>, Vec<RecordId>) {
    let mut linked = Vec::new();

    let rewritten = articles
        .iter()
        .map(|(title, body)| {
            let text = link_article(body, index, format, &mut linked);
            (title.clone(), text)
        })
        .collect();

    (rewritten, linked)
}

fn link_article(
    body: &str,
    index: &NameIndex,
    format: &LinkFormat,
    linked: &mut Vec<RecordId>,
) -> String {
    let mut text = body.to_string();

    for (key, entry) in index.iter() {
        // Keys made only of digits normalize to "" and would match anywhere
        if key.is_empty() || text.is_empty() {
            continue;
        }

        let reference = capitalize(key);
        if !text.contains(&reference) {
            continue;
        }

        text = replace_mentions(&text, &reference, entry, format);

        // every mention may already sit inside another record's link
        if text.contains(&format.opening_tag(&entry.name_id)) {
            tracing::trace!(reference = %reference, target = %entry.name_id, "Article mention");
            linked.push(entry.id);
        }
    }

    text
}
