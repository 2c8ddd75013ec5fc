//! Note collection repository over key-value storage.
//!
//! # Responsibility
//! - Serialize the whole note collection under a single fixed key.
//! - Decode persisted data back into notes, rejecting malformed records.
//!
//! # Invariants
//! - Writes replace the full collection; there are no partial deltas.
//! - Order of notes is preserved exactly across a write/read round-trip.
//! - An absent key is "no collection yet", distinct from an empty one.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::db::{DbError, KeyValueStore};
use crate::model::note::{Note, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_NOTES_KEY: &str = "notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note collection persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying key-value storage failed.
    Db(DbError),
    /// Collection could not be encoded or decoded as JSON.
    Serialization(serde_json::Error),
    /// Decoded data violates note invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "note collection encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Persistence contract for the note collection.
pub trait NoteRepository {
    /// Reads the stored collection, or `None` when nothing was ever stored.
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>>;
    /// Replaces the stored collection with `notes`.
    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()>;
}

/// JSON-encoded note collection kept under one key of a [`KeyValueStore`].
pub struct KvNoteRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    /// Uses [`DEFAULT_NOTES_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_NOTES_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> NoteRepository for KvNoteRepository<S> {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        match self.store.get(self.key.as_str())? {
            Some(raw) => decode_notes(raw.as_str()).map(Some),
            None => Ok(None),
        }
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let encoded = encode_notes(notes)?;
        self.store.set(self.key.as_str(), encoded.as_str())?;
        Ok(())
    }
}

/// Encodes notes into the persisted JSON array format.
pub fn encode_notes(notes: &[Note]) -> RepoResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Decodes the persisted JSON array format.
///
/// # Errors
/// - [`RepoError::Serialization`] for malformed JSON or missing fields.
/// - [`RepoError::InvalidData`] when a record fails note validation.
pub fn decode_notes(raw: &str) -> RepoResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw)?;
    for (index, note) in notes.iter().enumerate() {
        note.validate().map_err(|err| match err {
            NoteValidationError::EmptyId => {
                RepoError::InvalidData(format!("record {index} has an empty id"))
            }
            other => RepoError::InvalidData(format!("record {index}: {other}")),
        })?;
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, RepoError};

    #[test]
    fn decode_accepts_legacy_numeric_string_ids() {
        let raw = r#"[{"id":"1700000000000","title":"t","content":"c","timestamp":"2023-11-14T22:13:20.000Z"}]"#;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes[0].id, "1700000000000");
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let raw = r#"[{"id":"a","title":"t"}]"#;
        assert!(matches!(
            decode_notes(raw).unwrap_err(),
            RepoError::Serialization(_)
        ));
    }

    #[test]
    fn decode_rejects_empty_id() {
        let raw = r#"[{"id":"  ","title":"t","content":"","timestamp":"x"}]"#;
        assert!(matches!(
            decode_notes(raw).unwrap_err(),
            RepoError::InvalidData(_)
        ));
    }
}
