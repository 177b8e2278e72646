//! Record store: decrypted sections and re-encrypt-on-mutation persistence
//!
//! Every mutating operation re-serializes and re-encrypts all sections and
//! rewrites the whole envelope atomically. There is no batching: each CRUD
//! call is its own persisted transaction.
//!
//! With 2FA enabled, sections are double-wrapped: encrypt inner with the
//! master key then outer with the factor key; decrypt peels the factor
//! layer first. The order is symmetric and must never be flipped.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Session;
use crate::crypto::cipher::{decrypt, encrypt, EncryptedBlob};
use crate::error::{LockboxError, LockboxResult};
use crate::models::entry::{CredentialEntry, NoteEntry};
use crate::vault::envelope::{SECTION_CREDENTIALS, SECTION_NOTES};

impl Session {
    /// Decrypt one named section into its entry list.
    pub(crate) fn decrypt_section<T: DeserializeOwned>(
        &self,
        section: &str,
    ) -> LockboxResult<Vec<T>> {
        let blob = self
            .envelope()
            .data
            .get(section)
            .ok_or_else(|| LockboxError::Storage(format!("Missing section '{}'", section)))?;

        let plain = match self.factor_key() {
            Some(factor) => {
                // Outer layer: factor key; its plaintext is the inner blob
                let inner_bytes = decrypt(blob, factor)?;
                let inner: EncryptedBlob = serde_json::from_slice(&inner_bytes)
                    .map_err(|e| LockboxError::Decryption(format!("bad inner layer: {}", e)))?;
                decrypt(&inner, self.master_key())?
            }
            None => decrypt(blob, self.master_key())?,
        };

        serde_json::from_slice(&plain)
            .map_err(|e| LockboxError::Decryption(format!("bad section payload: {}", e)))
    }

    fn encrypt_section<T: Serialize>(&self, entries: &[T]) -> LockboxResult<EncryptedBlob> {
        let plain = serde_json::to_vec(entries)?;
        let inner = encrypt(&plain, self.master_key())?;
        match self.factor_key() {
            Some(factor) => encrypt(&serde_json::to_vec(&inner)?, factor),
            None => Ok(inner),
        }
    }

    /// Re-encrypt every section and rewrite the envelope atomically.
    pub fn persist(&mut self) -> LockboxResult<()> {
        let credentials_blob = self.encrypt_section(&self.credentials)?;
        let notes_blob = self.encrypt_section(&self.notes)?;
        self.envelope
            .data
            .insert(SECTION_CREDENTIALS.to_string(), credentials_blob);
        self.envelope
            .data
            .insert(SECTION_NOTES.to_string(), notes_blob);
        self.storage.store(&self.name, &self.envelope)
    }

    // --- credentials ---

    pub fn credentials(&self) -> &[CredentialEntry] {
        &self.credentials
    }

    /// Add a credential; returns its 1-based display number.
    pub fn add_credential(&mut self, entry: CredentialEntry) -> LockboxResult<usize> {
        self.credentials.push(entry);
        self.persist()?;
        Ok(self.credentials.len())
    }

    /// Get a credential by 1-based display number.
    pub fn get_credential(&self, number: usize) -> LockboxResult<&CredentialEntry> {
        let index = resolve(number, self.credentials.len())?;
        Ok(&self.credentials[index])
    }

    /// Edit a credential in place. `None` keeps the current value.
    pub fn edit_credential(
        &mut self,
        number: usize,
        name: Option<String>,
        username: Option<String>,
        secret: Option<String>,
    ) -> LockboxResult<()> {
        let index = resolve(number, self.credentials.len())?;
        let entry = &mut self.credentials[index];
        if let Some(name) = name {
            entry.name = name;
        }
        if let Some(username) = username {
            entry.username = username;
        }
        if let Some(secret) = secret {
            entry.secret = secret;
        }
        self.persist()
    }

    /// Delete a credential by display number. Later numbers shift down.
    pub fn delete_credential(&mut self, number: usize) -> LockboxResult<CredentialEntry> {
        let index = resolve(number, self.credentials.len())?;
        let removed = self.credentials.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Case-insensitive search over names and usernames, with display numbers.
    pub fn search_credentials(&self, query: &str) -> Vec<(usize, &CredentialEntry)> {
        self.credentials
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(query))
            .map(|(i, entry)| (i + 1, entry))
            .collect()
    }

    // --- notes ---

    pub fn notes(&self) -> &[NoteEntry] {
        &self.notes
    }

    /// Add a note; returns its 1-based display number.
    pub fn add_note(&mut self, note: NoteEntry) -> LockboxResult<usize> {
        self.notes.push(note);
        self.persist()?;
        Ok(self.notes.len())
    }

    /// Get a note by 1-based display number.
    pub fn get_note(&self, number: usize) -> LockboxResult<&NoteEntry> {
        let index = resolve(number, self.notes.len())?;
        Ok(&self.notes[index])
    }

    /// Delete a note by display number.
    pub fn delete_note(&mut self, number: usize) -> LockboxResult<NoteEntry> {
        let index = resolve(number, self.notes.len())?;
        let removed = self.notes.remove(index);
        self.persist()?;
        Ok(removed)
    }
}

/// Map a 1-based display number onto a vec index.
fn resolve(number: usize, len: usize) -> LockboxResult<usize> {
    if number == 0 || number > len {
        return Err(LockboxError::IndexOutOfBounds { index: number, len });
    }
    Ok(number - 1)
}
