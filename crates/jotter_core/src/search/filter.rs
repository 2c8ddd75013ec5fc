//! In-memory substring search over notes.
//!
//! # Responsibility
//! - Match notes against a user search term.
//!
//! # Invariants
//! - Matching is case-insensitive (Unicode lowercase) on title and content.
//! - An empty term matches every note.
//! - Filtering preserves input order and never mutates notes.

use crate::model::note::Note;

/// Returns whether `note` title or content contains `term`, ignoring case.
pub fn matches_term(note: &Note, term: &str) -> bool {
    term.is_empty() || matches_lowered(note, term.to_lowercase().as_str())
}

/// Returns the subsequence of `notes` matching `term`.
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    if term.is_empty() {
        return notes.iter().collect();
    }
    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_lowered(note, needle.as_str()))
        .collect()
}

fn matches_lowered(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, matches_term};
    use crate::model::note::Note;

    #[test]
    fn matches_content_case_insensitively() {
        let note = Note::new("", "Buy MILK tomorrow");
        assert!(matches_term(&note, "milk"));
        assert!(!matches_term(&note, "eggs"));
    }

    #[test]
    fn empty_term_keeps_everything_in_order() {
        let notes = vec![Note::new("b", ""), Note::new("a", "")];
        let all = filter_notes(&notes, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "b");
    }

    #[test]
    fn non_ascii_terms_fold_case() {
        let note = Note::new("Élan", "");
        assert!(matches_term(&note, "éLAN"));
    }
}
