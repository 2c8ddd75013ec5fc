//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into the note store use-cases.
//! - Keep callers decoupled from storage details.

pub mod note_store;
pub mod summary;
