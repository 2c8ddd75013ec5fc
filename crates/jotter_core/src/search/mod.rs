//! Note search entry points.
//!
//! # Responsibility
//! - Keep match rules for the note list search box inside core.

pub mod filter;
