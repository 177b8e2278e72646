//! Secret-strength scoring
//!
//! Delegates brute-force-resistance estimation to zxcvbn and maps its 0-4
//! score onto an ordered tier. The estimator's tier is the whole policy;
//! there is no extra length cutoff layered on top.

use zxcvbn::zxcvbn;

/// Ordered strength tiers, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Medium,
            3 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::VeryWeak => "VERY WEAK",
            Self::Weak => "WEAK",
            Self::Medium => "MEDIUM",
            Self::Strong => "STRONG",
            Self::VeryStrong => "VERY STRONG",
        };
        write!(f, "{}", label)
    }
}

/// The full scoring result for one secret.
#[derive(Debug, Clone)]
pub struct StrengthReport {
    pub tier: StrengthTier,
    /// Human-readable estimate for offline slow-hash cracking
    pub crack_time: String,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

/// Score a secret's brute-force resistance.
pub fn score_strength(secret: &str) -> StrengthReport {
    let estimate = zxcvbn(secret, &[]);
    let score: u8 = estimate.score().into();

    let (warning, suggestions) = match estimate.feedback() {
        Some(feedback) => (
            feedback.warning().map(|w| w.to_string()),
            feedback
                .suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        None => (None, Vec::new()),
    };

    StrengthReport {
        tier: StrengthTier::from_score(score),
        crack_time: estimate
            .crack_times()
            .offline_slow_hashing_1e4_per_second()
            .to_string(),
        warning,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(StrengthTier::VeryWeak < StrengthTier::Weak);
        assert!(StrengthTier::Strong < StrengthTier::VeryStrong);
    }

    #[test]
    fn test_trivial_secret_is_weak() {
        let report = score_strength("password");
        assert!(report.tier < StrengthTier::Medium);
    }

    #[test]
    fn test_long_random_secret_is_very_strong() {
        let report = score_strength("cT9#mQ2$vX7!pL4&wN8*");
        assert_eq!(report.tier, StrengthTier::VeryStrong);
    }

    #[test]
    fn test_weak_secret_has_feedback() {
        let report = score_strength("aaaaaaaa");
        // zxcvbn always explains very weak passwords
        assert!(report.warning.is_some() || !report.suggestions.is_empty());
    }

    #[test]
    fn test_crack_time_populated() {
        let report = score_strength("anything");
        assert!(!report.crack_time.is_empty());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(StrengthTier::VeryStrong.to_string(), "VERY STRONG");
        assert_eq!(StrengthTier::VeryWeak.to_string(), "VERY WEAK");
    }
}
