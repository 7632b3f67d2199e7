//! Top-level framing buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level bucket a keyword frame rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Construction of a political enemy.
    Enemy,
    /// Economic threat framing.
    Economic,
    /// War and military language.
    War,
    /// Liberty framing. Counted and reported, never part of the intensity score.
    Liberty,
}

impl Bucket {
    /// Get all buckets in reporting order.
    #[must_use]
    pub fn all() -> &'static [Bucket] {
        &[Bucket::Enemy, Bucket::Economic, Bucket::War, Bucket::Liberty]
    }

    /// Buckets summed into the security intensity score.
    #[must_use]
    pub fn scored() -> &'static [Bucket] {
        &[Bucket::Enemy, Bucket::Economic, Bucket::War]
    }

    /// Whether this bucket contributes to the security intensity score.
    #[must_use]
    pub fn is_scored(self) -> bool {
        !matches!(self, Bucket::Liberty)
    }

    /// Parse bucket from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "enemy" | "enemies" => Some(Bucket::Enemy),
            "economic" | "economy" => Some(Bucket::Economic),
            "war" | "military" => Some(Bucket::War),
            "liberty" | "freedom" => Some(Bucket::Liberty),
            _ => None,
        }
    }

    /// Column name used for this bucket's total in the augmented table.
    #[must_use]
    pub fn total_column(self) -> &'static str {
        match self {
            Bucket::Enemy => "total_enemies",
            Bucket::Economic => "total_economic",
            Bucket::War => "total_war",
            Bucket::Liberty => "total_liberty",
        }
    }

    /// Get the bucket description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Bucket::Enemy => "Actors framed as enemies of the nation",
            Bucket::Economic => "Economic conditions framed as an existential threat",
            Bucket::War => "War, battle and military vocabulary",
            Bucket::Liberty => "Liberty and free-market framing",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bucket::Enemy => "enemy",
            Bucket::Economic => "economic",
            Bucket::War => "war",
            Bucket::Liberty => "liberty",
        };
        write!(f, "{s}")
    }
}
