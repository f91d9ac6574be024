use serde::{Deserialize, Serialize};

/// Reputation of one domain as reported by the quick hash lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    /// "malicious", "safe", "unknown", ...
    pub result: String,
    /// Threat category; usually only present for malicious domains
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<String>,
}

/// Wrapper for Criminal IP API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}
