//! Mention matching in free text
//!
//! Finds where a set of candidate names first occurs in a text. The scan
//! visits candidates shortest first; the reported match is the leftmost
//! one, and among candidates starting at that same offset the longest
//! wins. Occurrences that sit directly after `">` are already the text of
//! an emitted link and are skipped, so links never nest.

/// Marker that closes an anchor's opening tag, right before its text
pub(crate) const LINK_TEXT_MARKER: &str = "\">";

/// A candidate found in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionMatch<'a> {
    /// The candidate that matched
    pub candidate: &'a str,
    /// Byte offset of the match in the text
    pub offset: usize,
}

impl MentionMatch<'_> {
    /// Byte offset just past the match (exclusive)
    pub fn end(&self) -> usize {
        self.offset + self.candidate.len()
    }
}

/// Find the leftmost, then longest, candidate occurring in `text`.
///
/// Only the first occurrence of each candidate is considered. Returns
/// `None` when nothing matches (including an empty candidate set).
pub fn longest_match<'a, I>(text: &str, candidates: I) -> Option<MentionMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<(usize, &'a str)> = candidates
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| (c.chars().count(), c))
        .collect();
    ordered.sort();
    ordered.dedup();

    let mut best: Option<(usize, MentionMatch<'a>)> = None;

    for (len, candidate) in ordered {
        let Some(offset) = text.find(candidate) else {
            continue;
        };

        if text[..offset].ends_with(LINK_TEXT_MARKER) {
            continue;
        }

        // Shorter candidates come first, so `>=` lets a longer candidate at
        // the same offset take over.
        let wins = match &best {
            None => true,
            Some((best_len, found)) => {
                offset < found.offset || (offset == found.offset && len >= *best_len)
            }
        };

        if wins {
            best = Some((len, MentionMatch { candidate, offset }));
        }
    }

    best.map(|(_, found)| found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOLEN: [&str; 4] = [
        "Nolen",
        "Nolen Constantin Lepidus",
        "Nolen Constantin Lepidus Silverbridge",
        "Nolen Silverbridge",
    ];

    fn find(text: &str, candidates: &[&'static str]) -> Option<(&'static str, usize)> {
        longest_match(text, candidates.iter().copied()).map(|m| (m.candidate, m.offset))
    }

    #[test]
    fn test_first_name_only() {
        assert_eq!(
            find("Seine Freunde nannten ihn Nolen.", &NOLEN),
            Some(("Nolen", 26))
        );
    }

    #[test]
    fn test_given_names_win_over_first_name() {
        assert_eq!(
            find("Getauft wurde er Nolen Constantin Lepidus.", &NOLEN),
            Some(("Nolen Constantin Lepidus", 17))
        );
    }

    #[test]
    fn test_full_name_wins() {
        assert_eq!(
            find(
                "Doch Nolen Constantin Lepidus Silverbridge war sein ganzer Name.",
                &NOLEN
            ),
            Some(("Nolen Constantin Lepidus Silverbridge", 5))
        );
    }

    #[test]
    fn test_leftmost_beats_longer_later_match() {
        assert_eq!(
            find("Bo met Alice Smith", &["Bo", "Alice Smith"]),
            Some(("Bo", 0))
        );
        assert_eq!(
            find("Alice Smith met Bo", &["Bo", "Alice Smith"]),
            Some(("Alice Smith", 0))
        );
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(find("anything at all", &[]), None);
        assert_eq!(find("", &[]), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find("Hello world", &NOLEN), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(find("nolen was here", &NOLEN), None);
    }

    #[test]
    fn test_skips_text_inside_link() {
        let text = r#"<a href="nolen2">Nolen</a> and Nolen"#;
        assert_eq!(find(text, &["Nolen"]), None);
    }

    #[test]
    fn test_empty_candidate_ignored() {
        assert_eq!(find("abc", &["", "b"]), Some(("b", 1)));
    }

    #[test]
    fn test_match_end() {
        let m = longest_match("The Nolen", ["Nolen"]).unwrap();
        assert_eq!(m.end(), 9);
        assert_eq!(&"The Nolen"[m.offset..m.end()], "Nolen");
    }
}
