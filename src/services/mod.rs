//! Business logic: strength scoring, breach lookups, advisory report, and
//! secret generation.

pub mod advisory;
pub mod exposure;
pub mod generator;
pub mod strength;
mod words;

pub use advisory::{AdvisoryReport, Finding};
pub use exposure::{Exposure, ExposureCheck, HibpChecker};
pub use generator::{generate, GeneratorConfig};
pub use strength::{score_strength, StrengthReport, StrengthTier};
