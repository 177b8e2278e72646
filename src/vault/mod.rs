//! The persisted database envelope
//!
//! Serialization model and structural schema validation for the on-disk
//! database file.

pub mod envelope;
pub mod schema;

pub use envelope::{
    Envelope, GeneratorSettings, HintSettings, KeySalts, TwoFactorSettings, VaultSettings,
    SECTION_CREDENTIALS, SECTION_NOTES,
};
pub use schema::validate_schema;
