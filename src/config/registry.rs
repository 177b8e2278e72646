//! Process-wide database registry
//!
//! One JSON file shared across all databases: which databases exist, and
//! which one is currently selected.

use serde::{Deserialize, Serialize};

use super::paths::LockboxPaths;
use crate::error::{LockboxError, LockboxResult};
use crate::storage::file_io;

/// The registry of known databases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// The currently selected database, if any
    pub selected: Option<String>,
    /// All known database names
    pub databases: Vec<String>,
}

impl Registry {
    /// Load the registry, or an empty one if none exists yet.
    pub fn load_or_create(paths: &LockboxPaths) -> LockboxResult<Self> {
        file_io::read_json(paths.registry_file())
    }

    /// Save the registry to disk.
    pub fn save(&self, paths: &LockboxPaths) -> LockboxResult<()> {
        paths.ensure_directories()?;
        file_io::write_json_atomic(paths.registry_file(), self)
    }

    /// Register a new database name and select it.
    pub fn add(&mut self, name: &str) -> LockboxResult<()> {
        if self.contains(name) {
            return Err(LockboxError::Duplicate {
                entity_type: "Database",
                identifier: name.to_string(),
            });
        }
        self.databases.push(name.to_string());
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Select an existing database.
    pub fn switch(&mut self, name: &str) -> LockboxResult<()> {
        if !self.contains(name) {
            return Err(LockboxError::database_not_found(name));
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Forget a database. Clears the selection if it pointed here.
    pub fn remove(&mut self, name: &str) -> LockboxResult<()> {
        if !self.contains(name) {
            return Err(LockboxError::database_not_found(name));
        }
        self.databases.retain(|db| db != name);
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        Ok(())
    }

    /// Rename a database, keeping the selection in sync.
    pub fn rename(&mut self, from: &str, to: &str) -> LockboxResult<()> {
        if !self.contains(from) {
            return Err(LockboxError::database_not_found(from));
        }
        if self.contains(to) {
            return Err(LockboxError::Duplicate {
                entity_type: "Database",
                identifier: to.to_string(),
            });
        }
        for db in &mut self.databases {
            if db == from {
                *db = to.to_string();
            }
        }
        if self.selected.as_deref() == Some(from) {
            self.selected = Some(to.to_string());
        }
        Ok(())
    }

    /// Whether a database name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.databases.iter().any(|db| db == name)
    }

    /// The selected database name, or an error if none is selected.
    pub fn require_selected(&self) -> LockboxResult<&str> {
        self.selected
            .as_deref()
            .ok_or_else(|| LockboxError::Config("No database selected; run 'lockbox new' or 'lockbox switch'".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_selects() {
        let mut registry = Registry::default();
        registry.add("personal").unwrap();
        assert_eq!(registry.selected.as_deref(), Some("personal"));
        assert!(registry.contains("personal"));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut registry = Registry::default();
        registry.add("personal").unwrap();
        assert!(matches!(
            registry.add("personal"),
            Err(LockboxError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_switch_unknown_fails() {
        let mut registry = Registry::default();
        assert!(registry.switch("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut registry = Registry::default();
        registry.add("personal").unwrap();
        registry.add("work").unwrap();
        registry.switch("personal").unwrap();

        registry.remove("personal").unwrap();
        assert_eq!(registry.selected, None);
        assert!(registry.contains("work"));
    }

    #[test]
    fn test_rename_keeps_selection() {
        let mut registry = Registry::default();
        registry.add("personal").unwrap();
        registry.rename("personal", "home").unwrap();
        assert_eq!(registry.selected.as_deref(), Some("home"));
        assert!(!registry.contains("personal"));
    }

    #[test]
    fn test_rename_to_existing_rejected() {
        let mut registry = Registry::default();
        registry.add("a").unwrap();
        registry.add("b").unwrap();
        assert!(matches!(
            registry.rename("a", "b"),
            Err(LockboxError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LockboxPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut registry = Registry::default();
        registry.add("personal").unwrap();
        registry.save(&paths).unwrap();

        let loaded = Registry::load_or_create(&paths).unwrap();
        assert_eq!(loaded.selected.as_deref(), Some("personal"));
        assert_eq!(loaded.databases, vec!["personal"]);
    }

    #[test]
    fn test_load_missing_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LockboxPaths::with_base_dir(temp_dir.path().to_path_buf());
        let registry = Registry::load_or_create(&paths).unwrap();
        assert!(registry.databases.is_empty());
        assert_eq!(registry.selected, None);
    }
}
