//! Path management for Lockbox
//!
//! Provides XDG-compliant path resolution for the registry, database files,
//! and archive directories.
//!
//! ## Path Resolution Order
//!
//! 1. `LOCKBOX_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/lockbox` or `~/.config/lockbox`
//! 3. Windows: `%APPDATA%\lockbox`

use std::path::PathBuf;

use crate::error::LockboxError;

/// Manages all paths used by Lockbox
#[derive(Debug, Clone)]
pub struct LockboxPaths {
    /// Base directory for all Lockbox data
    base_dir: PathBuf,
}

impl LockboxPaths {
    /// Create a new LockboxPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LockboxError> {
        let base_dir = if let Ok(custom) = std::env::var("LOCKBOX_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LockboxPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/lockbox/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding database files
    pub fn databases_dir(&self) -> PathBuf {
        self.base_dir.join("databases")
    }

    /// Get the path to a named database file
    pub fn database_file(&self, name: &str) -> PathBuf {
        self.databases_dir().join(format!("{}.json", name))
    }

    /// Get the path to the process-wide registry file
    pub fn registry_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the archive directory for a named database
    pub fn archive_dir(&self, name: &str) -> PathBuf {
        self.base_dir.join("archives").join(name)
    }

    /// Get the path to a database's archive manifest
    pub fn archive_manifest(&self, name: &str) -> PathBuf {
        self.archive_dir(name).join(".tree")
    }

    /// Ensure the base and databases directories exist
    pub fn ensure_directories(&self) -> Result<(), LockboxError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LockboxError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.databases_dir())
            .map_err(|e| LockboxError::Io(format!("Failed to create databases directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LockboxError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME").map(|home| PathBuf::from(home).join(".config"))
        })
        .map_err(|_| LockboxError::Config("Could not determine home directory".into()))?;
    Ok(config_base.join("lockbox"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LockboxError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LockboxError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("lockbox"))
}
