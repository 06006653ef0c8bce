//! Maps remaining-useful-life day counts to coarse risk tiers, and predictor
//! label strings back to tiers.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Good,
    Warning,
    Bad,
}

impl RiskTier {
    /// Tier from RUL in days. Boundaries are inclusive on the lower tier:
    /// RUL ≤ bad_max is bad, bad_max < RUL ≤ warning_max is warning.
    pub fn from_rul(rul_days: i64, config: &RiskConfig) -> Self {
        if rul_days <= config.bad_max_days {
            RiskTier::Bad
        } else if rul_days <= config.warning_max_days {
            RiskTier::Warning
        } else {
            RiskTier::Good
        }
    }

    /// Case-insensitive label mapping; anything unrecognized is None.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "good" => Some(RiskTier::Good),
            "warning" => Some(RiskTier::Warning),
            "bad" => Some(RiskTier::Bad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Good => "good",
            RiskTier::Warning => "warning",
            RiskTier::Bad => "bad",
        }
    }
}

/// A predictor's output: a known tier or the unknown bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    Tier(RiskTier),
    Unknown,
}

impl Prediction {
    pub fn from_label(label: &str) -> Self {
        match RiskTier::parse(label) {
            Some(tier) => Prediction::Tier(tier),
            None => Prediction::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Tier(tier) => tier.as_str(),
            Prediction::Unknown => "unknown",
        }
    }
}
