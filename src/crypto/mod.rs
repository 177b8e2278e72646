//! Cryptographic primitives
//!
//! Key derivation, authenticated encryption, and secure randomness.

pub mod cipher;
pub mod kdf;
pub mod random;

pub use cipher::{decrypt, decrypt_string, encrypt, encrypt_string, EncryptedBlob};
pub use kdf::{derive_checksum, derive_key, derive_with_salt, DerivedKey, SaltedChecksum};
pub use random::random_int;
