//! Name normalization for record matching
//!
//! Collapses a raw `name_id` into the key used by the name index:
//! - Drop everything from the first `_` on (disambiguation suffix)
//! - Strip decimal digits
//!
//! Also hosts `capitalize`, the casing rule shared by the variant generator
//! and the article rewriter.

/// Normalize a record `name_id` into its index key.
///
/// # Examples
///
/// ```
/// use lore_linker::linking::normalize::normalize;
///
/// assert_eq!(normalize("nolen2"), "nolen");
/// assert_eq!(normalize("test22_test3"), "test");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(name: &str) -> String {
    let prefix = name.split('_').next().unwrap_or_default();
    prefix.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Normalize an optional name; absent input yields an empty key
pub fn normalize_opt(name: Option<&str>) -> String {
    name.map(normalize).unwrap_or_default()
}

/// Upper-case the first character and lower-case the rest.
///
/// `"nolen"` -> `"Nolen"`, `"uMARON"` -> `"Umaron"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
