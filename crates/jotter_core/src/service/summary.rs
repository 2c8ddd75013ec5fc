//! List-row projection for notes.
//!
//! # Responsibility
//! - Derive a display title and a plain-text preview for note lists.
//!
//! # Invariants
//! - Projections are computed on read and never written back to storage.
//! - `preview_text` holds at most `PREVIEW_MAX_CHARS` characters.

use crate::model::note::{Note, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Title shown for notes saved without one.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled note";

const PREVIEW_MAX_CHARS: usize = 100;

static LINE_BREAK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(br|/p|/div|/li)\s*/?\s*>").expect("valid line break regex")
});
static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Display-ready summary of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    /// Note title, or [`UNTITLED_NOTE_TITLE`] when empty.
    pub display_title: String,
    /// Markup-free content excerpt (nullable).
    pub preview_text: Option<String>,
    pub timestamp: String,
}

impl NoteSummary {
    pub fn from_note(note: &Note) -> Self {
        let display_title = if note.title.trim().is_empty() {
            UNTITLED_NOTE_TITLE.to_string()
        } else {
            note.title.clone()
        };
        Self {
            id: note.id.clone(),
            display_title,
            preview_text: derive_preview_text(note.content.as_str()),
            timestamp: note.timestamp.clone(),
        }
    }
}

/// Strips simple markup from rich content and keeps a short excerpt.
///
/// Rules:
/// - line-ending tags (`<br>`, `</p>`, `</div>`, `</li>`) become spaces;
/// - all other tags are removed;
/// - common entities are decoded and whitespace collapsed;
/// - the first 100 characters are retained.
pub fn derive_preview_text(content: &str) -> Option<String> {
    let with_breaks = LINE_BREAK_TAG_RE.replace_all(content, " ");
    let without_tags = MARKUP_TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_entities(&without_tags);
    let normalized = WHITESPACE_RE.replace_all(&decoded, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` decodes to the literal `&lt;`.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{derive_preview_text, NoteSummary, UNTITLED_NOTE_TITLE};
    use crate::model::note::Note;

    #[test]
    fn preview_strips_markup_and_entities() {
        let preview =
            derive_preview_text("<p><b>Bold</b>&nbsp;move<br>next&amp;last</p>").unwrap();
        assert_eq!(preview, "Bold move next&last");
    }

    #[test]
    fn preview_is_capped() {
        let long = "word ".repeat(60);
        let preview = derive_preview_text(&long).unwrap();
        assert_eq!(preview.chars().count(), 100);
    }

    #[test]
    fn markup_only_content_has_no_preview() {
        assert!(derive_preview_text("<div><br></div>").is_none());
    }

    #[test]
    fn untitled_note_gets_placeholder_title_only_in_summary() {
        let note = Note::new("", "body");
        let summary = NoteSummary::from_note(&note);
        assert_eq!(summary.display_title, UNTITLED_NOTE_TITLE);
        assert!(note.title.is_empty());
    }
}
