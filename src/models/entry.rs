//! Stored entry types
//!
//! Plaintext forms of the records held inside encrypted sections. These
//! exist only in memory while a session is unlocked; on disk they live
//! serialized inside an [`EncryptedBlob`](crate::crypto::EncryptedBlob).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntryId, NoteId};

/// One stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Stable identifier, assigned at creation
    #[serde(default)]
    pub id: EntryId,
    /// What the credential is for ("github", "mail", ...)
    pub name: String,
    /// Account name or email
    pub username: String,
    /// The secret itself, plaintext only in memory
    pub secret: String,
}

impl CredentialEntry {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Case-insensitive match against name or username.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.username.to_lowercase().contains(&q)
    }
}

/// One free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Stable identifier, assigned at creation
    #[serde(default)]
    pub id: NoteId,
    /// Short title
    pub name: String,
    /// Free-text body
    pub body: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl NoteEntry {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            name: name.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive match against the note title.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
