use serde::Serialize;

use super::ReputationVerdict;

/// Everything learned about one URL of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlReport {
    pub url: String,
    #[serde(flatten)]
    pub reputation: ReputationVerdict,
    /// Raw risk scorer reply; only present when reputation was inconclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl UrlReport {
    pub fn new(url: impl Into<String>, reputation: ReputationVerdict) -> Self {
        Self {
            url: url.into(),
            reputation,
            analysis: None,
        }
    }
}
