//! Note store: in-memory collection, selection, and write-through persistence.
//!
//! # Responsibility
//! - Hold the ordered note collection and the current selection.
//! - Provide create-or-update, delete, lookup and search use-cases.
//! - Flush the whole collection to the repository after every mutation.
//!
//! # Invariants
//! - Notes keep insertion order; edits and searches never reorder them.
//! - Note ids are unique within the collection.
//! - Selection is either `None` or the id of a note in the collection.
//! - In-memory state is the session's source of truth: a failed flush is
//!   reported but never rolls back or corrupts the collection.
//! - Log events carry ids and counts only, never titles or contents.
//!
//! # See also
//! - docs/architecture/note-store.md

use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::search::filter::filter_notes;
use crate::service::summary::NoteSummary;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned by note store operations.
///
/// The store stays usable after any of these.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Save input was rejected; nothing changed.
    Validation(NoteValidationError),
    /// No note with this id; nothing changed.
    NotFound(NoteId),
    /// The in-memory change was applied but could not be persisted.
    Persistence(RepoError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Persistence(err) => write!(
                f,
                "changes were kept for this session but could not be saved: {err}"
            ),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteStoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Outcome of [`NoteStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of notes now held in memory.
    pub loaded: usize,
    /// `true` when stored data was unreadable and the store fell back to
    /// an empty collection, or duplicate ids were dropped.
    pub degraded: bool,
    /// `true` when the storage read itself failed, as opposed to returning
    /// malformed data. The stored collection may still be intact, and the
    /// next `save` or `delete` would overwrite it with the empty one.
    pub storage_unreadable: bool,
}

/// Single-session note store over a [`NoteRepository`].
pub struct NoteStore<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
    selected: Option<NoteId>,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Creates an empty, unselected store. Call [`NoteStore::load`] to read
    /// persisted notes.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            notes: Vec::new(),
            selected: None,
        }
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Never fails: missing data loads as empty, unreadable data loads as
    /// empty with `degraded = true`. Selection is cleared.
    ///
    /// Writes always replace the whole stored collection, so after a
    /// degraded load the next `save` or `delete` overwrites whatever was
    /// stored. Callers that want to protect data behind a transient read
    /// failure check [`LoadReport::storage_unreadable`] before writing.
    pub fn load(&mut self) -> LoadReport {
        self.selected = None;
        let mut storage_unreadable = false;
        let (notes, mut degraded) = match self.repo.load_notes() {
            Ok(Some(notes)) => (notes, false),
            Ok(None) => (Vec::new(), false),
            Err(err) => {
                storage_unreadable = matches!(err, RepoError::Db(_));
                warn!(
                    "event=notes_load module=store status=degraded error={}",
                    err
                );
                (Vec::new(), true)
            }
        };

        let before = notes.len();
        self.notes = dedupe_by_id(notes);
        if self.notes.len() != before {
            degraded = true;
            warn!(
                "event=notes_load module=store status=degraded dropped_duplicates={}",
                before - self.notes.len()
            );
        }

        info!(
            "event=notes_load module=store status=ok count={} degraded={} storage_unreadable={}",
            self.notes.len(),
            degraded,
            storage_unreadable
        );
        LoadReport {
            loaded: self.notes.len(),
            degraded,
            storage_unreadable,
        }
    }

    /// All notes in insertion order.
    pub fn list_all(&self) -> &[Note] {
        self.notes.as_slice()
    }

    /// Number of notes held.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Looks up one note by id.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Currently selected note id, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Currently selected note, if any.
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Selects the note with `id` for editing.
    ///
    /// # Errors
    /// - [`NoteStoreError::NotFound`] when absent; selection is unchanged.
    pub fn select(&mut self, id: &str) -> Result<&Note, NoteStoreError> {
        let Some(index) = self.position(id) else {
            debug!("event=note_select module=store status=not_found");
            return Err(NoteStoreError::NotFound(id.to_string()));
        };
        let note = &self.notes[index];
        self.selected = Some(note.id.clone());
        Ok(note)
    }

    /// Clears the selection, so the next save creates a new note.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Creates or updates a note, then flushes the collection.
    ///
    /// Title and content are trimmed. When a note is selected it is updated
    /// in place with a refreshed timestamp; otherwise a new note is appended
    /// and selected.
    ///
    /// # Errors
    /// - [`NoteStoreError::Validation`] when title and content are both
    ///   empty; nothing changes.
    /// - [`NoteStoreError::Persistence`] when the flush fails; the in-memory
    ///   change is kept.
    pub fn save(&mut self, title: &str, content: &str) -> Result<Note, NoteStoreError> {
        let draft = NoteDraft::parse(title, content)?;

        let target = self.selected.as_deref().and_then(|id| self.position(id));
        let (saved, mode) = match target {
            Some(index) => {
                let note = &mut self.notes[index];
                note.apply(draft);
                (note.clone(), "update")
            }
            None => {
                let note = draft.into_note();
                self.selected = Some(note.id.clone());
                self.notes.push(note.clone());
                (note, "create")
            }
        };

        self.flush("note_save")?;
        info!(
            "event=note_save module=store status=ok mode={} id={} count={}",
            mode,
            saved.id,
            self.notes.len()
        );
        Ok(saved)
    }

    /// Removes the note with `id`, then flushes the collection.
    ///
    /// Clears the selection when it pointed at the removed note.
    ///
    /// # Errors
    /// - [`NoteStoreError::NotFound`] when absent; nothing changes.
    /// - [`NoteStoreError::Persistence`] when the flush fails; the note stays
    ///   removed from memory.
    pub fn delete(&mut self, id: &str) -> Result<Note, NoteStoreError> {
        let Some(index) = self.position(id) else {
            debug!("event=note_delete module=store status=not_found");
            return Err(NoteStoreError::NotFound(id.to_string()));
        };

        let removed = self.notes.remove(index);
        if self.selected.as_deref() == Some(removed.id.as_str()) {
            self.selected = None;
        }

        self.flush("note_delete")?;
        info!(
            "event=note_delete module=store status=ok id={} count={}",
            removed.id,
            self.notes.len()
        );
        Ok(removed)
    }

    /// Notes whose title or content contains `term`, ignoring case.
    ///
    /// An empty term returns every note. Selection is untouched.
    pub fn filter(&self, term: &str) -> Vec<&Note> {
        filter_notes(self.notes.as_slice(), term)
    }

    /// List-row summaries for the notes matching `term`.
    pub fn summaries(&self, term: &str) -> Vec<NoteSummary> {
        self.filter(term)
            .into_iter()
            .map(NoteSummary::from_note)
            .collect()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn flush(&mut self, event: &'static str) -> Result<(), NoteStoreError> {
        if let Err(err) = self.repo.save_notes(self.notes.as_slice()) {
            warn!(
                "event={} module=store status=error error_code=persist_failed error={}",
                event, err
            );
            return Err(NoteStoreError::Persistence(err));
        }
        Ok(())
    }
}

fn dedupe_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    notes
        .into_iter()
        .filter(|note| seen.insert(note.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dedupe_by_id;
    use crate::model::note::Note;

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut first = Note::new("first", "");
        first.id = "same".to_string();
        let mut second = Note::new("second", "");
        second.id = "same".to_string();
        let other = Note::new("other", "");

        let kept = dedupe_by_id(vec![first, second, other]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "first");
        assert_eq!(kept[1].title, "other");
    }
}
