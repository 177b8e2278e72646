//! Vault-wide security advisory
//!
//! Scans every stored credential for three hazards: weak secrets, secrets
//! seen in known breaches, and secrets reused across entries. Breach
//! lookups degrade per item; one unreachable lookup marks that entry
//! unknown and the scan keeps going.

use std::collections::HashMap;

use super::exposure::{Exposure, ExposureCheck};
use super::strength::{score_strength, StrengthTier};
use crate::models::entry::CredentialEntry;

/// One flagged entry, identified the way listings identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based display number
    pub number: usize,
    pub name: String,
}

impl Finding {
    fn new(number: usize, entry: &CredentialEntry) -> Self {
        Self {
            number,
            name: entry.name.clone(),
        }
    }
}

/// Everything the scan found, grouped by hazard.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryReport {
    /// Entries scoring below VERY STRONG, with their tier
    pub weak: Vec<(Finding, StrengthTier)>,
    /// Entries seen in breaches, with the breach count
    pub leaked: Vec<(Finding, u32)>,
    /// Entries whose breach lookup could not complete
    pub unavailable: Vec<Finding>,
    /// Groups of entries sharing the exact same secret
    pub duplicate_groups: Vec<Vec<Finding>>,
}

impl AdvisoryReport {
    /// Scan a credential list against the given breach checker.
    pub fn scan(entries: &[CredentialEntry], checker: &dyn ExposureCheck) -> Self {
        let mut report = Self::default();

        for (index, entry) in entries.iter().enumerate() {
            let number = index + 1;
            let strength = score_strength(&entry.secret);
            if strength.tier < StrengthTier::VeryStrong {
                report.weak.push((Finding::new(number, entry), strength.tier));
            }
            match checker.check(&entry.secret) {
                Exposure::Count(0) => {}
                Exposure::Count(count) => {
                    report.leaked.push((Finding::new(number, entry), count));
                }
                Exposure::Unavailable => {
                    report.unavailable.push(Finding::new(number, entry));
                }
            }
        }

        report.duplicate_groups = duplicate_groups(entries);
        report
    }

    /// True when no hazard was found and every lookup completed.
    pub fn is_clean(&self) -> bool {
        self.weak.is_empty()
            && self.leaked.is_empty()
            && self.unavailable.is_empty()
            && self.duplicate_groups.is_empty()
    }
}

/// Group entries by exact secret, keeping only groups of two or more.
/// Groups come back ordered by the first position they appear at.
fn duplicate_groups(entries: &[CredentialEntry]) -> Vec<Vec<Finding>> {
    let mut by_secret: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        by_secret.entry(entry.secret.as_str()).or_default().push(index);
    }

    let mut groups: Vec<Vec<usize>> = by_secret
        .into_values()
        .filter(|indices| indices.len() > 1)
        .collect();
    groups.sort_by_key(|indices| indices[0]);

    groups
        .into_iter()
        .map(|indices| {
            indices
                .into_iter()
                .map(|index| Finding::new(index + 1, &entries[index]))
                .collect()
        })
        .collect()
}
