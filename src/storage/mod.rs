//! Storage layer for database envelopes
//!
//! Loading runs the structural schema check before any typed
//! deserialization, so a corrupt file is rejected without touching
//! in-memory state. Writing goes through the atomic temp-then-rename path.

pub mod file_io;

use std::fs;
use std::io::Read;

use crate::config::paths::LockboxPaths;
use crate::error::{CorruptionKind, LockboxError, LockboxResult};
use crate::vault::envelope::Envelope;
use crate::vault::schema::validate_schema;

/// Envelope persistence for named databases.
#[derive(Debug, Clone)]
pub struct Storage {
    paths: LockboxPaths,
}

impl Storage {
    pub fn new(paths: LockboxPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &LockboxPaths {
        &self.paths
    }

    /// Whether a database file exists on disk.
    pub fn exists(&self, name: &str) -> bool {
        self.paths.database_file(name).exists()
    }

    /// Load and validate a database envelope.
    ///
    /// Fails with [`LockboxError::CorruptDatabase`], distinguishing invalid
    /// serialization from schema mismatch.
    pub fn load(&self, name: &str) -> LockboxResult<Envelope> {
        let path = self.paths.database_file(name);
        if !path.exists() {
            return Err(LockboxError::database_not_found(name));
        }

        let mut contents = String::new();
        fs::File::open(&path)
            .map_err(|e| LockboxError::Storage(format!("Failed to open {}: {}", path.display(), e)))?
            .read_to_string(&mut contents)
            .map_err(|e| LockboxError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|_| LockboxError::CorruptDatabase {
                name: name.to_string(),
                kind: CorruptionKind::InvalidFormat,
            })?;

        if !validate_schema(&value) {
            return Err(LockboxError::CorruptDatabase {
                name: name.to_string(),
                kind: CorruptionKind::SchemaMismatch,
            });
        }

        // Key-paths match the template, so this only fails on value-level
        // type deviations, which are still a schema problem.
        serde_json::from_value(value).map_err(|_| LockboxError::CorruptDatabase {
            name: name.to_string(),
            kind: CorruptionKind::SchemaMismatch,
        })
    }

    /// Write a database envelope atomically.
    pub fn store(&self, name: &str, envelope: &Envelope) -> LockboxResult<()> {
        self.paths.ensure_directories()?;
        file_io::write_json_atomic(self.paths.database_file(name), envelope)
    }

    /// Delete a database file and its archive directory.
    pub fn delete(&self, name: &str) -> LockboxResult<()> {
        let path = self.paths.database_file(name);
        if !path.exists() {
            return Err(LockboxError::database_not_found(name));
        }
        fs::remove_file(&path)
            .map_err(|e| LockboxError::Storage(format!("Failed to delete database: {}", e)))?;

        let archive = self.paths.archive_dir(name);
        if archive.exists() {
            fs::remove_dir_all(&archive)
                .map_err(|e| LockboxError::Storage(format!("Failed to delete archive: {}", e)))?;
        }
        Ok(())
    }

    /// Rename a database file (and archive directory) on disk.
    pub fn rename(&self, from: &str, to: &str) -> LockboxResult<()> {
        let from_path = self.paths.database_file(from);
        let to_path = self.paths.database_file(to);
        if !from_path.exists() {
            return Err(LockboxError::database_not_found(from));
        }
        if to_path.exists() {
            return Err(LockboxError::Duplicate {
                entity_type: "Database",
                identifier: to.to_string(),
            });
        }
        fs::rename(&from_path, &to_path)
            .map_err(|e| LockboxError::Storage(format!("Failed to rename database: {}", e)))?;

        let from_archive = self.paths.archive_dir(from);
        if from_archive.exists() {
            fs::rename(from_archive, self.paths.archive_dir(to))
                .map_err(|e| LockboxError::Storage(format!("Failed to rename archive: {}", e)))?;
        }
        Ok(())
    }
}
