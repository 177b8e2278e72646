//! End-to-end lifecycle tests against the library API: create a database,
//! mutate it across sessions, rotate secrets, and verify what lands on disk.

use std::fs;

use lockbox::config::paths::LockboxPaths;
use lockbox::config::registry::Registry;
use lockbox::error::{CorruptionKind, LockboxError};
use lockbox::models::alias::Alias;
use lockbox::models::entry::{CredentialEntry, NoteEntry};
use lockbox::services::advisory::AdvisoryReport;
use lockbox::services::exposure::{Exposure, ExposureCheck};
use lockbox::services::generator::{generate, GeneratorConfig};
use lockbox::services::strength::{score_strength, StrengthTier};
use lockbox::session::Session;
use lockbox::storage::Storage;
use tempfile::TempDir;

fn storage_in(temp_dir: &TempDir) -> Storage {
    Storage::new(LockboxPaths::with_base_dir(temp_dir.path().to_path_buf()))
}

struct OfflineChecker;

impl ExposureCheck for OfflineChecker {
    fn check(&self, _secret: &str) -> Exposure {
        Exposure::Unavailable
    }
}

#[test]
fn full_lifecycle_across_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);

    // Create, add a generated credential and a note
    let mut session = Session::create(storage.clone(), "personal", "Tr0ub4dor&3").unwrap();
    let secret = generate(GeneratorConfig::default());
    assert_eq!(score_strength(&secret).tier, StrengthTier::VeryStrong);

    session
        .add_credential(CredentialEntry::new("github", "octocat", secret.clone()))
        .unwrap();
    session
        .add_note(NoteEntry::new("recovery codes", "1234 5678"))
        .unwrap();
    drop(session);

    // Reopen and verify everything survived the round trip
    let session = Session::unlock(storage.clone(), "personal", "Tr0ub4dor&3", None).unwrap();
    assert_eq!(session.credentials().len(), 1);
    assert_eq!(session.credentials()[0].secret, secret);
    assert_eq!(session.notes()[0].body, "1234 5678");

    // Secrets never appear in the database file
    let raw = fs::read_to_string(storage.paths().database_file("personal")).unwrap();
    assert!(!raw.contains(&secret));
    assert!(!raw.contains("1234 5678"));
    assert!(!raw.contains("Tr0ub4dor&3"));
}

#[test]
fn master_rotation_and_second_factor() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);

    let mut session = Session::create(storage.clone(), "db", "first passphrase").unwrap();
    session
        .add_credential(CredentialEntry::new("mail", "me", "kept-secret"))
        .unwrap();

    session.change_master("second passphrase").unwrap();
    session.enable_two_factor("first pet?", "rex").unwrap();
    drop(session);

    // Old passphrase is dead
    assert!(matches!(
        Session::unlock(storage.clone(), "db", "first passphrase", Some("rex")),
        Err(LockboxError::AuthenticationFailed { .. })
    ));

    // New passphrase alone is not enough
    assert!(matches!(
        Session::unlock(storage.clone(), "db", "second passphrase", None),
        Err(LockboxError::AuthenticationFailed { two_factor: true })
    ));

    // Both secrets open the double-wrapped sections
    let session =
        Session::unlock(storage, "db", "second passphrase", Some("rex")).unwrap();
    assert_eq!(session.credentials()[0].secret, "kept-secret");
}

#[test]
fn settings_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);

    let mut session = Session::create(storage.clone(), "db", "passphrase").unwrap();
    session.set_hint(true, "the usual one").unwrap();
    session.set_generator(true, false).unwrap();
    session
        .set_alias(Alias::parse("g", &["get", "$0"]))
        .unwrap();
    drop(session);

    let session = Session::unlock(storage, "db", "passphrase", None).unwrap();
    assert!(session.find_alias("g").is_some());
    let settings = &session.envelope().settings;
    assert!(settings.hint.enabled);
    assert_eq!(settings.hint.text, "the usual one");
    assert!(settings.generator.wordy);
    assert!(!settings.generator.wordy_strength_gate);
}

#[test]
fn tampered_file_is_rejected_before_unlock() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);

    Session::create(storage.clone(), "db", "passphrase").unwrap();

    // Drop a required key from the stored JSON
    let path = storage.paths().database_file("db");
    let raw = fs::read_to_string(&path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value.as_object_mut().unwrap().remove("checksum");
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let err = Session::unlock(storage, "db", "passphrase", None).unwrap_err();
    assert!(matches!(
        err,
        LockboxError::CorruptDatabase {
            kind: CorruptionKind::SchemaMismatch,
            ..
        }
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn advisory_degrades_without_network() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);

    let mut session = Session::create(storage, "db", "passphrase").unwrap();
    session
        .add_credential(CredentialEntry::new("mail", "me", "password"))
        .unwrap();

    let report = AdvisoryReport::scan(session.credentials(), &OfflineChecker);
    // Strength scoring still runs; the breach lookup is marked unknown
    assert_eq!(report.weak.len(), 1);
    assert_eq!(report.unavailable.len(), 1);
    assert!(report.leaked.is_empty());
}

#[test]
fn registry_tracks_database_files() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);
    let paths = storage.paths().clone();

    let mut registry = Registry::load_or_create(&paths).unwrap();
    registry.add("personal").unwrap();
    Session::create(storage.clone(), "personal", "passphrase").unwrap();
    registry.save(&paths).unwrap();

    // Rename moves both the registry entry and the file
    storage.rename("personal", "home").unwrap();
    registry.rename("personal", "home").unwrap();
    assert!(storage.exists("home"));
    assert!(!storage.exists("personal"));
    assert_eq!(registry.selected.as_deref(), Some("home"));

    // Delete clears both
    storage.delete("home").unwrap();
    registry.remove("home").unwrap();
    assert!(!storage.exists("home"));
    assert_eq!(registry.selected, None);
}
