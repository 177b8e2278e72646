//! Lockbox - Local encrypted credential store
//!
//! This library provides the core functionality for the Lockbox password
//! manager: named encrypted databases holding credentials, notes, and an
//! encrypted file archive, unlocked with a master passphrase and an
//! optional second factor.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and the database registry
//! - `error`: Custom error types
//! - `crypto`: Key derivation, authenticated encryption, secure randomness
//! - `models`: Plaintext record types and command aliases
//! - `vault`: The on-disk envelope and its schema check
//! - `storage`: Atomic JSON persistence
//! - `session`: Authenticated sessions and the record store
//! - `services`: Strength scoring, breach lookups, advisory, generation
//! - `archive`: Encrypted file archive
//! - `cli`: Subcommand handlers and the interactive loop
//!
//! # Example
//!
//! ```rust,ignore
//! use lockbox::config::paths::LockboxPaths;
//! use lockbox::session::Session;
//! use lockbox::storage::Storage;
//!
//! let storage = Storage::new(LockboxPaths::new()?);
//! let session = Session::unlock(storage, "personal", passphrase, None)?;
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod vault;

pub use error::{LockboxError, LockboxResult};
