//! Core data models
//!
//! Typed entries, stable IDs, and the alias AST.

pub mod alias;
pub mod entry;
pub mod ids;

pub use alias::{Alias, AliasToken};
pub use entry::{CredentialEntry, NoteEntry};
pub use ids::{EntryId, NoteId};
