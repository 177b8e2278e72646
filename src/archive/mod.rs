//! Encrypted file archive, a side-channel next to the record store
//!
//! Archiving moves a file off the filesystem and into the database's
//! archive directory as an encrypted blob, keyed with the same wrap rule
//! as the record sections (inner master, outer factor when 2FA is on).
//! A `.tree` manifest maps each item name to the path it came from, or to
//! the literal `"DIRECTORY"` for directory entries; a directory's files
//! are archived individually under `dir/...` names, each carrying its own
//! origin path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::cipher::{decrypt, encrypt, EncryptedBlob};
use crate::error::{LockboxError, LockboxResult};
use crate::session::Session;
use crate::storage::file_io;

/// Manifest value marking a directory entry.
const DIRECTORY_MARKER: &str = "DIRECTORY";

/// Manifest file name inside the archive directory.
const MANIFEST_NAME: &str = ".tree";

type Manifest = BTreeMap<String, String>;

/// One manifest row for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    /// Original path, or `"DIRECTORY"`
    pub origin: String,
}

/// List every archived item for the session's database.
pub fn list(session: &Session) -> LockboxResult<Vec<ArchiveEntry>> {
    let manifest = load_manifest(session)?;
    Ok(manifest
        .into_iter()
        .map(|(name, origin)| ArchiveEntry { name, origin })
        .collect())
}

/// Archive a single file; the original is removed once the blob is safely
/// written. Returns the item name.
pub fn archive_file(session: &Session, path: &Path) -> LockboxResult<String> {
    let name = item_name(path)?;
    let mut manifest = load_manifest(session)?;
    archive_one(session, &mut manifest, &name, path)?;
    save_manifest(session, &manifest)?;
    fs::remove_file(path)
        .map_err(|e| LockboxError::Storage(format!("Failed to remove original: {}", e)))?;
    Ok(name)
}

/// Archive a directory recursively; every file lands under `dir/...` and
/// the directory itself gets a marker entry. Returns the item names.
pub fn archive_dir(session: &Session, path: &Path) -> LockboxResult<Vec<String>> {
    let dir_name = item_name(path)?;
    let mut manifest = load_manifest(session)?;
    if manifest.contains_key(&dir_name) {
        return Err(LockboxError::Duplicate {
            entity_type: "Archived item",
            identifier: dir_name,
        });
    }

    let files = collect_files(path)?;
    let mut names = Vec::with_capacity(files.len());
    for file in &files {
        let relative = file
            .strip_prefix(path)
            .map_err(|_| LockboxError::Storage("File escaped directory walk".to_string()))?;
        let name = format!("{}/{}", dir_name, relative.display());
        archive_one(session, &mut manifest, &name, file)?;
        names.push(name);
    }
    manifest.insert(dir_name, DIRECTORY_MARKER.to_string());
    save_manifest(session, &manifest)?;

    fs::remove_dir_all(path)
        .map_err(|e| LockboxError::Storage(format!("Failed to remove original: {}", e)))?;
    Ok(names)
}

/// Restore an archived item to its recorded path and drop it from the
/// archive. Restoring a directory entry restores every file beneath it.
pub fn unarchive(session: &Session, name: &str) -> LockboxResult<Vec<PathBuf>> {
    let mut manifest = load_manifest(session)?;
    let origin = manifest
        .get(name)
        .cloned()
        .ok_or_else(|| LockboxError::archive_not_found(name))?;

    let mut restored = Vec::new();
    if origin == DIRECTORY_MARKER {
        let prefix = format!("{}/", name);
        let children: Vec<(String, String)> = manifest
            .iter()
            .filter(|(child, _)| child.starts_with(&prefix))
            .map(|(child, child_origin)| (child.clone(), child_origin.clone()))
            .collect();
        for (child, child_origin) in children {
            restored.push(restore_one(session, &child, &child_origin)?);
            manifest.remove(&child);
        }
        manifest.remove(name);
    } else {
        restored.push(restore_one(session, name, &origin)?);
        manifest.remove(name);
    }

    save_manifest(session, &manifest)?;
    Ok(restored)
}

fn archive_one(
    session: &Session,
    manifest: &mut Manifest,
    name: &str,
    path: &Path,
) -> LockboxResult<()> {
    if manifest.contains_key(name) {
        return Err(LockboxError::Duplicate {
            entity_type: "Archived item",
            identifier: name.to_string(),
        });
    }

    let origin = fs::canonicalize(path)
        .map_err(|e| LockboxError::Storage(format!("Cannot resolve {}: {}", path.display(), e)))?;
    let bytes = fs::read(path)
        .map_err(|e| LockboxError::Storage(format!("Cannot read {}: {}", path.display(), e)))?;
    let blob = wrap(session, &bytes)?;

    let blob_path = blob_path(session, name);
    if let Some(parent) = blob_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LockboxError::Storage(format!("Failed to create archive dir: {}", e)))?;
    }
    file_io::write_json_atomic(blob_path, &blob)?;
    manifest.insert(name.to_string(), origin.display().to_string());
    Ok(())
}

fn restore_one(session: &Session, name: &str, origin: &str) -> LockboxResult<PathBuf> {
    let blob_path = blob_path(session, name);
    let raw = fs::read(&blob_path)
        .map_err(|e| LockboxError::Storage(format!("Missing archive blob {}: {}", name, e)))?;
    let blob: EncryptedBlob = serde_json::from_slice(&raw)?;
    let bytes = unwrap(session, &blob)?;

    let target = PathBuf::from(origin);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LockboxError::Storage(format!("Failed to recreate path: {}", e)))?;
    }
    file_io::write_bytes_atomic(&target, &bytes)?;
    fs::remove_file(&blob_path)
        .map_err(|e| LockboxError::Storage(format!("Failed to remove blob: {}", e)))?;
    Ok(target)
}

/// Same wrap rule as the record sections.
fn wrap(session: &Session, bytes: &[u8]) -> LockboxResult<EncryptedBlob> {
    let inner = encrypt(bytes, session.master_key())?;
    match session.factor_key() {
        Some(factor) => encrypt(&serde_json::to_vec(&inner)?, factor),
        None => Ok(inner),
    }
}

fn unwrap(session: &Session, blob: &EncryptedBlob) -> LockboxResult<Vec<u8>> {
    match session.factor_key() {
        Some(factor) => {
            let inner_bytes = decrypt(blob, factor)?;
            let inner: EncryptedBlob = serde_json::from_slice(&inner_bytes)
                .map_err(|e| LockboxError::Decryption(format!("bad inner layer: {}", e)))?;
            decrypt(&inner, session.master_key())
        }
        None => decrypt(blob, session.master_key()),
    }
}

fn item_name(path: &Path) -> LockboxResult<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LockboxError::Storage(format!("Unusable path: {}", path.display())))?;
    if name == MANIFEST_NAME {
        return Err(LockboxError::Storage(
            "That name is reserved for the archive manifest".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn collect_files(dir: &Path) -> LockboxResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .map_err(|e| LockboxError::Storage(format!("Cannot read {}: {}", dir.display(), e)))?;
    for entry in entries {
        let entry =
            entry.map_err(|e| LockboxError::Storage(format!("Directory walk failed: {}", e)))?;
        let path = entry.path();
        if path.is_dir() {
            files.extend(collect_files(&path)?);
        } else {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn blob_path(session: &Session, name: &str) -> PathBuf {
    session
        .storage()
        .paths()
        .archive_dir(session.name())
        .join(name)
}

fn load_manifest(session: &Session) -> LockboxResult<Manifest> {
    let path = session.storage().paths().archive_manifest(session.name());
    file_io::read_json(&path)
}

fn save_manifest(session: &Session, manifest: &Manifest) -> LockboxResult<()> {
    let path = session.storage().paths().archive_manifest(session.name());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LockboxError::Storage(format!("Failed to create archive dir: {}", e)))?;
    }
    file_io::write_json_atomic(path, manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LockboxPaths;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn open_session(temp_dir: &TempDir) -> Session {
        let paths = LockboxPaths::with_base_dir(temp_dir.path().join("data"));
        Session::create(Storage::new(paths), "db", "pass").unwrap()
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(&temp_dir);

        let secret_file = temp_dir.path().join("diary.txt");
        fs::write(&secret_file, b"dear diary").unwrap();

        let name = archive_file(&session, &secret_file).unwrap();
        assert_eq!(name, "diary.txt");
        assert!(!secret_file.exists());
        assert_eq!(list(&session).unwrap().len(), 1);

        let restored = unarchive(&session, "diary.txt").unwrap();
        assert_eq!(restored, vec![secret_file.clone()]);
        assert_eq!(fs::read(&secret_file).unwrap(), b"dear diary");
        assert!(list(&session).unwrap().is_empty());
    }

    #[test]
    fn test_blob_on_disk_is_not_plaintext() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(&temp_dir);

        let secret_file = temp_dir.path().join("diary.txt");
        fs::write(&secret_file, b"dear diary").unwrap();
        archive_file(&session, &secret_file).unwrap();

        let blob = fs::read_to_string(blob_path(&session, "diary.txt")).unwrap();
        assert!(!blob.contains("dear diary"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(&temp_dir);

        let first = temp_dir.path().join("diary.txt");
        fs::write(&first, b"one").unwrap();
        archive_file(&session, &first).unwrap();

        let second = temp_dir.path().join("other").join("diary.txt");
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&second, b"two").unwrap();
        assert!(matches!(
            archive_file(&session, &second),
            Err(LockboxError::Duplicate { .. })
        ));
        // the second original is untouched
        assert!(second.exists());
    }

    #[test]
    fn test_unarchive_unknown_name() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(&temp_dir);
        assert!(unarchive(&session, "ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_directory_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(&temp_dir);

        let dir = temp_dir.path().join("taxes");
        fs::create_dir_all(dir.join("2025")).unwrap();
        fs::write(dir.join("summary.txt"), b"totals").unwrap();
        fs::write(dir.join("2025").join("q1.txt"), b"q1 numbers").unwrap();

        let names = archive_dir(&session, &dir).unwrap();
        assert_eq!(names.len(), 2);
        assert!(!dir.exists());

        let listing = list(&session).unwrap();
        let dir_entry = listing.iter().find(|e| e.name == "taxes").unwrap();
        assert_eq!(dir_entry.origin, DIRECTORY_MARKER);

        unarchive(&session, "taxes").unwrap();
        assert_eq!(fs::read(dir.join("summary.txt")).unwrap(), b"totals");
        assert_eq!(fs::read(dir.join("2025").join("q1.txt")).unwrap(), b"q1 numbers");
        assert!(list(&session).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_with_two_factor() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        session.enable_two_factor("pet?", "rex").unwrap();

        let secret_file = temp_dir.path().join("keys.bin");
        fs::write(&secret_file, [0u8, 159, 146, 150]).unwrap();

        archive_file(&session, &secret_file).unwrap();
        unarchive(&session, "keys.bin").unwrap();
        assert_eq!(fs::read(&secret_file).unwrap(), [0u8, 159, 146, 150]);
    }
}
