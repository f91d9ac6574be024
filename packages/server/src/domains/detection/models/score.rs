use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // The only reply format the model is asked for
    static ref TOTAL_SCORE_REGEX: Regex = Regex::new(r"\[totalscore: ([0-9]+)\]").unwrap();
}

/// Score pulled out of a model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskScore {
    Scored(u32),
    /// The reply had no `[totalscore: N]` marker
    NotFound,
}

impl RiskScore {
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Scored(score) => Some(*score),
            Self::NotFound => None,
        }
    }
}

/// Find the first `[totalscore: N]` marker in a model reply.
///
/// Anything around the marker is ignored and a reply without the marker yields
/// [`RiskScore::NotFound`]. A number too large for `u32` saturates, so it
/// still reads as the highest risk.
pub fn parse_total_score(reply: &str) -> RiskScore {
    TOTAL_SCORE_REGEX
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| RiskScore::Scored(m.as_str().parse().unwrap_or(u32::MAX)))
        .unwrap_or(RiskScore::NotFound)
}
