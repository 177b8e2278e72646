//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives authentication checksums and encryption keys from user secrets.
//! The iteration count is deliberately high: the cost of one derivation is
//! negligible interactively but ruinous for offline brute force against a
//! stolen database file.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::Hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::random::random_bytes;
use crate::error::{LockboxError, LockboxResult};

type PbkdfSha256Hmac = Hmac<Sha256>;

/// PBKDF2 iteration count. Fixed; changing it invalidates every stored
/// checksum.
pub const PBKDF2_ROUNDS: u32 = 500_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived output length in bytes (AES-256 key size)
pub const KEY_LEN: usize = 32;

/// A derivation result bundling the checksum with the salt that produced it,
/// as stored in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaltedChecksum {
    /// Base64 of the 32-byte PBKDF2 output
    pub checksum: String,
    /// Base64 of the 16-byte salt
    pub salt: String,
}

impl SaltedChecksum {
    /// Verify a presented secret against this stored checksum.
    ///
    /// Re-derives with the stored salt and compares in constant time.
    pub fn verify(&self, secret: &str) -> LockboxResult<bool> {
        let candidate = derive_with_salt(secret, &self.salt)?;
        let stored = decode_b64(&self.checksum, "checksum")?;
        let derived = decode_b64(&candidate, "checksum")?;
        if stored.len() != derived.len() {
            return Ok(false);
        }
        Ok(stored.ct_eq(&derived).into())
    }
}

/// A 32-byte symmetric key, zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive a fresh salted checksum from a secret.
///
/// Generates a random salt, applies PBKDF2, and returns both so the caller
/// can persist them together.
pub fn derive_checksum(secret: &str) -> LockboxResult<SaltedChecksum> {
    let salt = random_bytes(SALT_LEN);
    let digest = pbkdf2_digest(secret.as_bytes(), &salt)?;
    Ok(SaltedChecksum {
        checksum: STANDARD.encode(digest),
        salt: STANDARD.encode(salt),
    })
}

/// Verify-only form: derive the checksum for a secret under a known salt.
pub fn derive_with_salt(secret: &str, salt_b64: &str) -> LockboxResult<String> {
    let salt = decode_b64(salt_b64, "salt")?;
    let digest = pbkdf2_digest(secret.as_bytes(), &salt)?;
    Ok(STANDARD.encode(digest))
}

/// Derive an encryption key for a secret under a known salt.
pub fn derive_key(secret: &str, salt_b64: &str) -> LockboxResult<DerivedKey> {
    let salt = decode_b64(salt_b64, "salt")?;
    let key = pbkdf2_digest(secret.as_bytes(), &salt)?;
    Ok(DerivedKey { key })
}

fn pbkdf2_digest(secret: &[u8], salt: &[u8]) -> LockboxResult<[u8; KEY_LEN]> {
    pbkdf2::pbkdf2_array::<PbkdfSha256Hmac, KEY_LEN>(secret, salt, PBKDF2_ROUNDS)
        .map_err(|e| LockboxError::Encryption(format!("Key derivation failed: {}", e)))
}

fn decode_b64(value: &str, what: &str) -> LockboxResult<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| LockboxError::Encryption(format!("Invalid {} encoding: {}", what, e)))
}
