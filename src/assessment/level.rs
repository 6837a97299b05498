use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Readiness band for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    HighlyPrepared,
    WellPrepared,
    Moderate,
    NeedsStrengthening,
}

impl ReadinessLevel {
    pub fn from_score(total_score: u8) -> Self {
        if total_score >= 80 {
            ReadinessLevel::HighlyPrepared
        } else if total_score >= 60 {
            ReadinessLevel::WellPrepared
        } else if total_score >= 40 {
            ReadinessLevel::Moderate
        } else {
            ReadinessLevel::NeedsStrengthening
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLevel::HighlyPrepared => "Highly prepared",
            ReadinessLevel::WellPrepared => "Well prepared",
            ReadinessLevel::Moderate => "Moderately prepared",
            ReadinessLevel::NeedsStrengthening => "Needs strengthening",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ReadinessLevel::HighlyPrepared => "🚀",
            ReadinessLevel::WellPrepared => "✅",
            ReadinessLevel::Moderate => "⚠️",
            ReadinessLevel::NeedsStrengthening => "🔧",
        }
    }

    /// Brand color used by the HTML report
    pub fn color(&self) -> &'static str {
        match self {
            ReadinessLevel::HighlyPrepared => "#27AE60",
            ReadinessLevel::WellPrepared => "#00D4AA",
            ReadinessLevel::Moderate => "#F5A623",
            ReadinessLevel::NeedsStrengthening => "#E74C3C",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

/// Lead triage bucket for stored assessments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTier {
    /// 80 and above
    High,
    /// 60 to 79
    Medium,
    /// Below 60
    Low,
}

impl LeadTier {
    pub const ALL: [LeadTier; 3] = [LeadTier::High, LeadTier::Medium, LeadTier::Low];

    pub fn from_score(total_score: u8) -> Self {
        if total_score >= 80 {
            LeadTier::High
        } else if total_score >= 60 {
            LeadTier::Medium
        } else {
            LeadTier::Low
        }
    }

    pub fn contains(&self, total_score: u8) -> bool {
        LeadTier::from_score(total_score) == *self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadTier::High => "high",
            LeadTier::Medium => "medium",
            LeadTier::Low => "low",
        }
    }
}

impl fmt::Display for LeadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tier '{}' (expected high, medium or low)", s))
    }
}
