//! Envelope data model
//!
//! The envelope is the entire logical structure of one database file:
//! passphrase checksum, key salts, settings, and the encrypted sections.
//! Nothing in here ever holds plaintext payloads; decrypted entries live in
//! the session's record store.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::crypto::cipher::EncryptedBlob;
use crate::crypto::kdf::{SaltedChecksum, SALT_LEN};
use crate::crypto::random::random_bytes;
use crate::models::alias::Alias;

/// Section name for credential entries
pub const SECTION_CREDENTIALS: &str = "credentials";
/// Section name for note entries
pub const SECTION_NOTES: &str = "notes";

/// Salts for re-deriving the encryption keys from presented secrets.
///
/// Distinct from the checksum salts: a stored checksum must never equal an
/// encryption key, or the file would carry its own decryption key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySalts {
    /// Salt for the master encryption key (base64)
    pub key: String,
    /// Salt for the second-factor encryption key (base64)
    pub twofactor: String,
}

impl KeySalts {
    /// Generate a fresh pair of random salts.
    pub fn generate() -> Self {
        Self {
            key: fresh_salt(),
            twofactor: fresh_salt(),
        }
    }
}

/// One fresh random salt, base64 encoded.
pub fn fresh_salt() -> String {
    STANDARD.encode(random_bytes(SALT_LEN))
}

/// Second-factor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorSettings {
    pub enabled: bool,
    /// The security question shown at unlock
    pub question: String,
    /// Checksum of the expected answer
    pub checksum: SaltedChecksum,
}

/// Passphrase hint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSettings {
    pub enabled: bool,
    pub text: String,
}

/// Password generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Prefer dictionary-word generation over random characters
    pub wordy: bool,
    /// Whether wordy output must also pass the strength gate
    pub wordy_strength_gate: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            wordy: false,
            wordy_strength_gate: true,
        }
    }
}

/// Per-database user settings stored inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSettings {
    pub two_factor: TwoFactorSettings,
    pub hint: HintSettings,
    pub aliases: Vec<Alias>,
    pub generator: GeneratorSettings,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            two_factor: TwoFactorSettings {
                enabled: false,
                question: String::new(),
                checksum: SaltedChecksum {
                    checksum: String::new(),
                    salt: String::new(),
                },
            },
            hint: HintSettings {
                enabled: false,
                text: String::new(),
            },
            aliases: Vec::new(),
            generator: GeneratorSettings::default(),
        }
    }
}

/// The entire persisted structure of one database file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Verifies the master passphrase
    pub checksum: SaltedChecksum,
    /// Salts for re-deriving encryption keys
    pub salt: KeySalts,
    /// User settings
    pub settings: VaultSettings,
    /// Named encrypted sections
    pub data: BTreeMap<String, EncryptedBlob>,
}

impl Envelope {
    /// The canonical shape every valid database file must match, key-path
    /// for key-path. Values are placeholders.
    pub fn template() -> Self {
        let mut data = BTreeMap::new();
        data.insert(SECTION_CREDENTIALS.to_string(), EncryptedBlob::empty());
        data.insert(SECTION_NOTES.to_string(), EncryptedBlob::empty());
        Self {
            checksum: SaltedChecksum {
                checksum: String::new(),
                salt: String::new(),
            },
            salt: KeySalts {
                key: String::new(),
                twofactor: String::new(),
            },
            settings: VaultSettings::default(),
            data,
        }
    }

    /// Names of the payload sections, in stable order.
    pub fn section_names() -> [&'static str; 2] {
        [SECTION_CREDENTIALS, SECTION_NOTES]
    }
}
