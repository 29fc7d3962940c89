//! Person name variants
//!
//! A person is mentioned under several proper-name forms. For
//! `["Nolen", "Constantin", "Lepidus"]` / `Silverbridge` these are:
//!
//! | form                      | example                               |
//! |---------------------------|---------------------------------------|
//! | all names + last name     | Nolen Constantin Lepidus Silverbridge |
//! | first name + last name    | Nolen Silverbridge                    |
//! | all names                 | Nolen Constantin Lepidus              |
//! | first name                | Nolen                                 |

use std::collections::BTreeSet;

use super::index::IndexEntry;
use super::normalize::capitalize;

/// All proper-name strings that count as a mention of the person.
///
/// Given names are capitalized; the last name is appended verbatim so
/// particles like "von" keep their casing. Empty forms are dropped.
pub fn name_variants(names: &[String], last_name: Option<&str>) -> BTreeSet<String> {
    let given: Vec<String> = names
        .iter()
        .map(|n| capitalize(n.trim()))
        .filter(|n| !n.is_empty())
        .collect();

    let Some(first) = given.first() else {
        return BTreeSet::new();
    };

    let last = last_name.map(str::trim).filter(|l| !l.is_empty());
    let all = given.join(" ");

    let with_last = |base: &str| match last {
        Some(last) => format!("{} {}", base, last),
        None => base.to_string(),
    };

    [
        with_last(all.as_str()),
        with_last(first.as_str()),
        all.clone(),
        first.clone(),
    ]
    .into_iter()
    .filter(|v| !v.is_empty())
    .collect()
}

/// Name variants of an index entry (empty for non-persons)
pub fn variants(entry: &IndexEntry) -> BTreeSet<String> {
    if !entry.is_person() {
        return BTreeSet::new();
    }
    name_variants(&entry.names, entry.last_name.as_deref())
}
