//! Leaked-secret lookups against the Have I Been Pwned range API
//!
//! Uses the k-anonymity model: only the first 5 hex characters of the
//! secret's SHA-1 ever leave the machine; the returned suffix list is
//! matched locally. A network failure yields [`Exposure::Unavailable`],
//! which is never the same thing as "seen zero times".

use std::time::Duration;

use sha1::{Digest, Sha1};

/// Default base URL for the Pwned Passwords API.
const HIBP_DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com";

/// Request timeout; the only programmatic timeout in the system.
const HIBP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one breach lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// Number of times the secret appears in known breaches (0 = not seen)
    Count(u32),
    /// The lookup service could not be reached; nothing is known
    Unavailable,
}

/// Seam for the breach-lookup collaborator, so the advisory can be tested
/// without a network.
pub trait ExposureCheck {
    fn check(&self, secret: &str) -> Exposure;
}

/// Live checker against the HIBP range API.
pub struct HibpChecker {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HibpChecker {
    pub fn new() -> Self {
        Self::with_base_url(HIBP_DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(HIBP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn query(&self, secret: &str) -> Result<u32, reqwest::Error> {
        let (prefix, suffix) = hash_for_range_query(secret);
        let url = format!("{}/range/{}", self.base_url, prefix);
        let body = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(parse_range_response(&body, &suffix))
    }
}

impl Default for HibpChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureCheck for HibpChecker {
    fn check(&self, secret: &str) -> Exposure {
        match self.query(secret) {
            Ok(count) => Exposure::Count(count),
            Err(_) => Exposure::Unavailable,
        }
    }
}

/// Hash a secret with SHA-1 and split into (5-char prefix, 35-char suffix).
fn hash_for_range_query(secret: &str) -> (String, String) {
    let hash = Sha1::digest(secret.as_bytes());
    let hash_hex = format!("{:X}", hash);
    let (prefix, suffix) = hash_hex.split_at(5);
    (prefix.to_string(), suffix.to_string())
}

/// Parse a range API response ("SUFFIX:COUNT\r\n...") for one suffix.
fn parse_range_response(response: &str, target_suffix: &str) -> u32 {
    response
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(hash_suffix, _)| hash_suffix.eq_ignore_ascii_case(target_suffix))
        .and_then(|(_, count)| count.trim().parse().ok())
        .unwrap_or(0)
}
