//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its identity/timestamp helpers.
//! - Validate user input before a note is created or updated.
//!
//! # Invariants
//! - `id` is assigned once and never rewritten.
//! - `timestamp` is an RFC 3339 UTC string with millisecond precision.
//! - A refreshed timestamp never sorts before the previous one.
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Freshly created notes get a UUID v4 string, but identifiers loaded from
/// storage are accepted verbatim, so this stays a plain string.
pub type NoteId = String;

/// Validation failure for note input or persisted note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Both title and content are empty after trimming.
    EmptyNote,
    /// A note record carries an empty identifier.
    EmptyId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "note needs a title or some content"),
            Self::EmptyId => write!(f, "note id cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// A user-authored note.
///
/// Field names match the persisted JSON shape exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Rich text body; may embed simple markup such as `<b>` or `<br>`.
    pub content: String,
    /// Time of creation or last modification, RFC 3339 in UTC.
    pub timestamp: String,
}

impl Note {
    /// Creates a note with a generated unique id and the current time.
    ///
    /// Input is stored as given; callers normalize it first (see
    /// [`NoteDraft::parse`]).
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_note_id(),
            title: title.into(),
            content: content.into(),
            timestamp: next_timestamp(None),
        }
    }

    /// Replaces title and content and refreshes the timestamp.
    pub fn apply(&mut self, draft: NoteDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.timestamp = next_timestamp(Some(self.timestamp.as_str()));
    }

    /// Checks the record-level invariants enforced on persisted data.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        Ok(())
    }

    /// Parses the stored timestamp, if it is well-formed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp.as_str())
    }
}

/// Normalized title/content pair accepted by a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Trims surrounding whitespace and rejects an entirely empty note.
    pub fn parse(title: &str, content: &str) -> Result<Self, NoteValidationError> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            return Err(NoteValidationError::EmptyNote);
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    /// Converts this draft into a brand-new note.
    pub fn into_note(self) -> Note {
        Note::new(self.title, self.content)
    }
}

/// Generates a collision-resistant note id.
///
/// Ids come from random UUID v4 values, so two notes created in the same
/// instant still get distinct ids.
pub fn generate_note_id() -> NoteId {
    Uuid::new_v4().to_string()
}

/// Formats a timestamp the way notes persist it.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a persisted RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Returns the timestamp for a save, never earlier than `previous`.
///
/// An unparseable `previous` value is ignored.
pub fn next_timestamp(previous: Option<&str>) -> String {
    let now = Utc::now();
    let effective = match previous.and_then(parse_timestamp) {
        Some(prev) if prev > now => prev,
        _ => now,
    };
    format_timestamp(effective)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, next_timestamp, parse_timestamp, NoteDraft, NoteValidationError};
    use chrono::{Duration, Utc};

    #[test]
    fn draft_trims_and_keeps_single_side() {
        let draft = NoteDraft::parse("  Title  ", "   ").unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.content, "");
    }

    #[test]
    fn draft_rejects_whitespace_only_input() {
        let err = NoteDraft::parse(" \n", "\t ").unwrap_err();
        assert_eq!(err, NoteValidationError::EmptyNote);
    }

    #[test]
    fn timestamp_uses_millisecond_utc_format() {
        let stamp = next_timestamp(None);
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2024-01-01T00:00:00.000Z".len());
        assert!(parse_timestamp(&stamp).is_some());
    }

    #[test]
    fn next_timestamp_never_moves_backwards() {
        let future = format_timestamp(Utc::now() + Duration::hours(1));
        assert_eq!(next_timestamp(Some(&future)), future);
    }

    #[test]
    fn next_timestamp_ignores_garbage_previous_value() {
        let stamp = next_timestamp(Some("yesterday-ish"));
        assert!(parse_timestamp(&stamp).is_some());
    }
}
