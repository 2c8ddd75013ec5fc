//! Core domain logic for Jotter.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{DbError, DbResult, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::note_repo::{
    KvNoteRepository, NoteRepository, RepoError, RepoResult, DEFAULT_NOTES_KEY,
};
pub use search::filter::{filter_notes, matches_term};
pub use service::note_store::{LoadReport, NoteStore, NoteStoreError};
pub use service::summary::{NoteSummary, UNTITLED_NOTE_TITLE};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
