//! Custom error types for Lockbox
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Why a database file was rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionKind {
    /// The file is not valid JSON at all
    InvalidFormat,
    /// The JSON parses but its key-paths deviate from the envelope template
    SchemaMismatch,
}

impl std::fmt::Display for CorruptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "invalid serialization"),
            Self::SchemaMismatch => write!(f, "schema mismatch"),
        }
    }
}

/// The main error type for Lockbox operations
#[derive(Error, Debug)]
pub enum LockboxError {
    /// The database file cannot be trusted; the session never starts
    #[error("Corrupt database '{name}': {kind}")]
    CorruptDatabase { name: String, kind: CorruptionKind },

    /// Wrong master passphrase and/or second factor. Deliberately does not
    /// say which check failed.
    #[error("Authentication failed: wrong password{}", if *.two_factor { " or second factor" } else { "" })]
    AuthenticationFailed { two_factor: bool },

    /// A user-supplied entry number outside the live range
    #[error("ID {index} out of bounds (1..={len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Key/nonce/ciphertext mismatch; only arises from a corrupt or
    /// tampered file
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Encryption-side failures (cipher setup, bad encodings)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The breach-lookup service could not be reached
    #[error("Breach lookup unavailable: {0}")]
    NetworkUnavailable(String),

    /// Alias invoked with fewer arguments than its parameters require
    #[error("Alias '{alias}' expects {expected} argument(s), got {got}")]
    UnexpectedArgumentCount {
        alias: String,
        expected: usize,
        got: usize,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LockboxError {
    /// Create a "not found" error for databases
    pub fn database_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Database",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for archived items
    pub fn archive_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Archived item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for aliases
    pub fn alias_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Alias",
            identifier: identifier.into(),
        }
    }

    /// True for errors a session loop may render and recover from.
    /// `CorruptDatabase` and `Decryption` abort the whole session instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CorruptDatabase { .. } | Self::Decryption(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LockboxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LockboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Lockbox operations
pub type LockboxResult<T> = Result<T, LockboxError>;
