//! Repository layer for note persistence.
//!
//! # Responsibility
//! - Define the collection-level persistence contract.
//! - Isolate serialization and storage details from the note store.
//!
//! # Invariants
//! - Repositories return semantic errors (`InvalidData`) in addition to
//!   storage transport errors.
//!
//! # See also
//! - docs/architecture/storage.md

pub mod note_repo;
