//! Authenticated session over one database
//!
//! A [`Session`] owns the loaded envelope, the derived encryption keys, and
//! the decrypted record sections, and is passed explicitly to every command
//! handler, with no ambient globals. It exists only after authentication
//! succeeds, so holding a `Session` is proof of an unlocked database.
//!
//! State machine: `Locked -> Authenticating -> { Unlocked | Locked }`.
//! Construction is the only transition into `Unlocked`; dropping the
//! session (keys zeroized) is the only way back.

pub mod records;

use crate::crypto::kdf::{derive_checksum, derive_key, DerivedKey, SaltedChecksum};
use crate::error::{LockboxError, LockboxResult};
use crate::models::alias::Alias;
use crate::models::entry::{CredentialEntry, NoteEntry};
use crate::storage::Storage;
use crate::vault::envelope::{fresh_salt, Envelope, KeySalts};

/// An unlocked database session.
#[derive(Debug)]
pub struct Session {
    name: String,
    storage: Storage,
    envelope: Envelope,
    /// Master encryption key, derived from the passphrase and `salt.key`
    master_key: DerivedKey,
    /// Second-factor encryption key, present iff 2FA is enabled
    factor_key: Option<DerivedKey>,
    credentials: Vec<CredentialEntry>,
    notes: Vec<NoteEntry>,
}

impl Session {
    /// Initialize a brand-new database and return it unlocked.
    pub fn create(storage: Storage, name: &str, passphrase: &str) -> LockboxResult<Self> {
        let checksum = derive_checksum(passphrase)?;
        let salt = KeySalts::generate();
        let master_key = derive_key(passphrase, &salt.key)?;

        let mut envelope = Envelope::template();
        envelope.checksum = checksum;
        envelope.salt = salt;

        let mut session = Self {
            name: name.to_string(),
            storage,
            envelope,
            master_key,
            factor_key: None,
            credentials: Vec::new(),
            notes: Vec::new(),
        };
        session.persist()?;
        Ok(session)
    }

    /// Authenticate against a stored database and decrypt its sections.
    ///
    /// The factor answer is required exactly when the database has 2FA
    /// enabled. Both checks always run; the failure is a single generic
    /// [`LockboxError::AuthenticationFailed`] that does not say which
    /// secret was wrong.
    pub fn unlock(
        storage: Storage,
        name: &str,
        passphrase: &str,
        factor_answer: Option<&str>,
    ) -> LockboxResult<Self> {
        let envelope = storage.load(name)?;
        let two_factor = envelope.settings.two_factor.enabled;

        let passphrase_ok = envelope.checksum.verify(passphrase)?;
        let factor_ok = if two_factor {
            match factor_answer {
                Some(answer) => envelope.settings.two_factor.checksum.verify(answer)?,
                None => false,
            }
        } else {
            true
        };

        if !(passphrase_ok && factor_ok) {
            return Err(LockboxError::AuthenticationFailed { two_factor });
        }

        let master_key = derive_key(passphrase, &envelope.salt.key)?;
        let factor_key = if two_factor {
            // factor_ok guarantees the answer is present
            let answer = factor_answer.unwrap_or_default();
            Some(derive_key(answer, &envelope.salt.twofactor)?)
        } else {
            None
        };

        let mut session = Self {
            name: name.to_string(),
            storage,
            envelope,
            master_key,
            factor_key,
            credentials: Vec::new(),
            notes: Vec::new(),
        };
        session.credentials = session.decrypt_section(crate::vault::SECTION_CREDENTIALS)?;
        session.notes = session.decrypt_section(crate::vault::SECTION_NOTES)?;
        Ok(session)
    }

    /// Database name this session is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the envelope (settings, checksums).
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether this database requires a second factor.
    pub fn two_factor_enabled(&self) -> bool {
        self.envelope.settings.two_factor.enabled
    }

    /// Rotate the master passphrase.
    ///
    /// The sections are already plaintext in memory; only after that holds
    /// may the checksum and key salt be swapped. `persist` then re-encrypts
    /// everything under the new key. Violating this ordering would silently
    /// destroy all payloads.
    pub fn change_master(&mut self, new_passphrase: &str) -> LockboxResult<()> {
        self.envelope.checksum = derive_checksum(new_passphrase)?;
        self.envelope.salt.key = fresh_salt();
        self.master_key = derive_key(new_passphrase, &self.envelope.salt.key)?;
        self.persist()
    }

    /// Enable the second factor with a question/answer pair.
    ///
    /// Sections become double-wrapped (inner master, outer factor) on the
    /// persist that follows.
    pub fn enable_two_factor(&mut self, question: &str, answer: &str) -> LockboxResult<()> {
        let checksum = derive_checksum(answer)?;
        self.envelope.salt.twofactor = fresh_salt();
        self.factor_key = Some(derive_key(answer, &self.envelope.salt.twofactor)?);

        let tfa = &mut self.envelope.settings.two_factor;
        tfa.enabled = true;
        tfa.question = question.to_string();
        tfa.checksum = checksum;
        self.persist()
    }

    /// Disable the second factor; sections unwrap back to a single layer.
    pub fn disable_two_factor(&mut self) -> LockboxResult<()> {
        self.factor_key = None;
        let tfa = &mut self.envelope.settings.two_factor;
        tfa.enabled = false;
        tfa.question = String::new();
        tfa.checksum = SaltedChecksum {
            checksum: String::new(),
            salt: String::new(),
        };
        self.persist()
    }

    /// Configure the passphrase hint.
    pub fn set_hint(&mut self, enabled: bool, text: &str) -> LockboxResult<()> {
        self.envelope.settings.hint.enabled = enabled;
        self.envelope.settings.hint.text = text.to_string();
        self.persist()
    }

    /// Configure the generator mode and wordy strength gate.
    pub fn set_generator(&mut self, wordy: bool, wordy_strength_gate: bool) -> LockboxResult<()> {
        self.envelope.settings.generator.wordy = wordy;
        self.envelope.settings.generator.wordy_strength_gate = wordy_strength_gate;
        self.persist()
    }

    /// Define (or replace) an alias.
    pub fn set_alias(&mut self, alias: Alias) -> LockboxResult<()> {
        self.envelope
            .settings
            .aliases
            .retain(|existing| existing.name != alias.name);
        self.envelope.settings.aliases.push(alias);
        self.persist()
    }

    /// Remove an alias by name.
    pub fn remove_alias(&mut self, name: &str) -> LockboxResult<()> {
        let before = self.envelope.settings.aliases.len();
        self.envelope.settings.aliases.retain(|a| a.name != name);
        if self.envelope.settings.aliases.len() == before {
            return Err(LockboxError::alias_not_found(name));
        }
        self.persist()
    }

    /// Look up an alias by its trigger word.
    pub fn find_alias(&self, name: &str) -> Option<&Alias> {
        self.envelope.settings.aliases.iter().find(|a| a.name == name)
    }

    pub(crate) fn master_key(&self) -> &DerivedKey {
        &self.master_key
    }

    pub(crate) fn factor_key(&self) -> Option<&DerivedKey> {
        self.factor_key.as_ref()
    }
}
