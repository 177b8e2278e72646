//! AES-256-GCM encryption/decryption
//!
//! Authenticated encryption for envelope sections and archive blobs. Each
//! call generates a fresh random nonce; nonce reuse is forbidden.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::DerivedKey;
use crate::crypto::random::random_bytes;
use crate::error::{LockboxError, LockboxResult};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// An encrypted payload as persisted inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// The nonce used for this encryption (base64 encoded)
    pub iv: String,
    /// The ciphertext with authentication tag (base64 encoded)
    pub ciphertext: String,
}

impl EncryptedBlob {
    fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            iv: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
        }
    }

    /// An empty placeholder blob, used by the envelope template.
    pub fn empty() -> Self {
        Self {
            iv: String::new(),
            ciphertext: String::new(),
        }
    }

    fn decode_iv(&self) -> LockboxResult<Vec<u8>> {
        STANDARD
            .decode(&self.iv)
            .map_err(|e| LockboxError::Decryption(format!("invalid nonce encoding: {}", e)))
    }

    fn decode_ciphertext(&self) -> LockboxResult<Vec<u8>> {
        STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| LockboxError::Decryption(format!("invalid ciphertext encoding: {}", e)))
    }
}

/// Encrypt plaintext bytes under a derived key.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> LockboxResult<EncryptedBlob> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let nonce_bytes = random_bytes(NONCE_SIZE);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LockboxError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedBlob::new(&nonce_bytes, &ciphertext))
}

/// Decrypt a blob under a derived key.
///
/// Fails with [`LockboxError::Decryption`] when the key, nonce, and
/// ciphertext are inconsistent; never returns garbage.
pub fn decrypt(blob: &EncryptedBlob, key: &DerivedKey) -> LockboxResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let nonce_bytes = blob.decode_iv()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(LockboxError::Decryption(format!(
            "invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = blob.decode_ciphertext()?;

    cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| LockboxError::Decryption("invalid key or corrupted data".to_string()))
}

/// Encrypt a string
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> LockboxResult<EncryptedBlob> {
    encrypt(plaintext.as_bytes(), key)
}

/// Decrypt to a string
pub fn decrypt_string(blob: &EncryptedBlob, key: &DerivedKey) -> LockboxResult<String> {
    let plaintext = decrypt(blob, key)?;
    String::from_utf8(plaintext)
        .map_err(|e| LockboxError::Decryption(format!("invalid UTF-8 in decrypted data: {}", e)))
}
