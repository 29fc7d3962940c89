//! Link markup and text rewriting
//!
//! `linkify` wraps every match of a candidate set in an anchor, left to
//! right. `replace_mentions` picks the strategy by target kind: persons are
//! linked under all their name variants, everything else under the one
//! matched string.

use std::collections::BTreeSet;

use super::index::IndexEntry;
use super::matcher::longest_match;
use super::normalize::capitalize;
use super::variants::variants;

/// How emitted anchors are formatted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFormat {
    /// Prepended to the target `name_id` in `href` (e.g. "records/")
    pub href_prefix: String,
}

impl LinkFormat {
    pub fn new(href_prefix: impl Into<String>) -> Self {
        Self {
            href_prefix: href_prefix.into(),
        }
    }

    /// `<a href="{prefix}{name_id}">{text}</a>`, unescaped
    pub fn anchor(&self, name_id: &str, text: &str) -> String {
        format!("{}{}</a>", self.opening_tag(name_id), text)
    }

    /// `<a href="{prefix}{name_id}">`
    pub fn opening_tag(&self, name_id: &str) -> String {
        format!(r#"<a href="{}{}">"#, self.href_prefix, name_id)
    }
}

/// Replace every candidate mention in `text` with a link to `name_id`.
///
/// Each step links the best match (see `longest_match`) and continues on
/// the text after it, until no candidate is left.
pub fn linkify(
    text: &str,
    candidates: &BTreeSet<String>,
    name_id: &str,
    format: &LinkFormat,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(found) = longest_match(rest, candidates.iter().map(String::as_str)) {
        output.push_str(&rest[..found.offset]);
        output.push_str(&format.anchor(name_id, found.candidate));
        rest = &rest[found.end()..];
    }

    output.push_str(rest);
    output
}

/// Turn mentions of `target` in `text` into links.
///
/// - Non-persons: the first occurrence of `matched` outside any existing
///   anchor becomes a link showing `capitalize(matched)`. Nothing happens if
///   that exact link is already present.
/// - Persons: `matched` is ignored and every name variant is linked.
///
/// `multi` entries are linked like any other.
pub fn replace_mentions(
    text: &str,
    matched: &str,
    target: &IndexEntry,
    format: &LinkFormat,
) -> String {
    if target.is_person() {
        return linkify(text, &variants(target), &target.name_id, format);
    }

    if matched.is_empty() {
        return text.to_string();
    }

    let link = format.anchor(&target.name_id, &capitalize(matched));
    if text.contains(&link) {
        return text.to_string();
    }

    let Some(offset) = text
        .match_indices(matched)
        .map(|(offset, _)| offset)
        .find(|&offset| !inside_anchor(text, offset))
    else {
        return text.to_string();
    };

    let mut output = String::with_capacity(text.len() + link.len());
    output.push_str(&text[..offset]);
    output.push_str(&link);
    output.push_str(&text[offset + matched.len()..]);
    output
}

const ANCHOR_OPEN: &str = "<a ";
const ANCHOR_CLOSE: &str = "</a>";

/// True when `offset` lies within an anchor element, tag or text
fn inside_anchor(text: &str, offset: usize) -> bool {
    let before = &text[..offset];
    match before.rfind(ANCHOR_OPEN) {
        Some(open) => !before[open..].contains(ANCHOR_CLOSE),
        None => false,
    }
}

/// Remove anchor tags, keeping their text
#[cfg(test)]
pub(crate) fn strip_anchors(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<a href=\"") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start..];
        let Some(close) = after_open.find("\">") else {
            output.push_str(after_open);
            return output;
        };
        rest = &after_open[close + 2..];
        if let Some(end) = rest.find("</a>") {
            output.push_str(&rest[..end]);
            rest = &rest[end + 4..];
        }
    }
    output.push_str(rest);
    output
}
