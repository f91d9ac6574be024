use serde::{Deserialize, Serialize};
use std::fmt;

use super::RiskScore;

/// Final label for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "phishing")]
    Phishing,
    #[serde(rename = "caution")]
    Caution,
    #[serde(rename = "attention")]
    Attention,
    #[serde(rename = "safe")]
    Safe,
    #[serde(rename = "no-urls-found")]
    NoUrlsFound,
}

impl Verdict {
    /// Map a risk score to a label.
    ///
    /// Only 25, 50 and 75+ raise a flag. Every other value, a missing score,
    /// and a message whose reputation was conclusive all read as safe.
    pub fn from_score(score: RiskScore) -> Self {
        match score {
            RiskScore::Scored(s) if s >= 75 => Self::Phishing,
            RiskScore::Scored(50) => Self::Caution,
            RiskScore::Scored(25) => Self::Attention,
            _ => Self::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing => "phishing",
            Self::Caution => "caution",
            Self::Attention => "attention",
            Self::Safe => "safe",
            Self::NoUrlsFound => "no-urls-found",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_mapping() {
        assert_eq!(Verdict::from_score(RiskScore::Scored(100)), Verdict::Phishing);
        assert_eq!(Verdict::from_score(RiskScore::Scored(75)), Verdict::Phishing);
        assert_eq!(Verdict::from_score(RiskScore::Scored(50)), Verdict::Caution);
        assert_eq!(Verdict::from_score(RiskScore::Scored(25)), Verdict::Attention);
        assert_eq!(Verdict::from_score(RiskScore::Scored(0)), Verdict::Safe);
        assert_eq!(Verdict::from_score(RiskScore::NotFound), Verdict::Safe);
    }

    #[test]
    fn test_off_grid_scores_are_safe() {
        assert_eq!(Verdict::from_score(RiskScore::Scored(30)), Verdict::Safe);
        assert_eq!(Verdict::from_score(RiskScore::Scored(60)), Verdict::Safe);
        assert_eq!(Verdict::from_score(RiskScore::Scored(74)), Verdict::Safe);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(serde_json::to_string(&Verdict::NoUrlsFound).unwrap(), "\"no-urls-found\"");
        assert_eq!(serde_json::to_string(&Verdict::Phishing).unwrap(), "\"phishing\"");
        assert_eq!(Verdict::Caution.to_string(), "caution");
    }
}
