//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical note record used by storage and the note store.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
