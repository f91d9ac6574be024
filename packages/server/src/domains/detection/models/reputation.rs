use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::kernel::DomainReputation;

/// Threat type reported when a malicious domain comes back without one.
pub const UNSPECIFIED_THREAT_TYPE: &str = "N/A";

/// Status reported by the reputation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReputationStatus {
    Malicious,
    Unknown,
    /// Any other status, kept verbatim ("safe", "normal", ...)
    Other(String),
}

impl ReputationStatus {
    pub fn parse(result: &str) -> Self {
        match result {
            "malicious" => Self::Malicious,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Malicious => "malicious",
            Self::Unknown => "unknown",
            Self::Other(status) => status,
        }
    }
}

/// Normalized outcome of one reputation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReputationVerdict {
    Rated {
        status: ReputationStatus,
        /// Only set for malicious domains
        threat_type: Option<String>,
    },
    /// Transport failure, non-2xx status or malformed body
    Error { message: String },
}

impl ReputationVerdict {
    pub fn from_report(report: DomainReputation) -> Self {
        let status = ReputationStatus::parse(&report.result);
        let threat_type = match status {
            ReputationStatus::Malicious => Some(
                report
                    .threat_type
                    .unwrap_or_else(|| UNSPECIFIED_THREAT_TYPE.to_string()),
            ),
            _ => None,
        };

        Self::Rated {
            status,
            threat_type,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<&ReputationStatus> {
        match self {
            Self::Rated { status, .. } => Some(status),
            Self::Error { .. } => None,
        }
    }

    /// Reputation alone cannot decide; the page needs a content analysis.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self.status(), Some(ReputationStatus::Unknown))
    }
}

// Serialized flat, the way the lookup is logged: {"status": ..., "type": ...} or {"error": ...}
impl Serialize for ReputationVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Rated {
                status,
                threat_type,
            } => {
                map.serialize_entry("status", status.as_str())?;
                if let Some(threat_type) = threat_type {
                    map.serialize_entry("type", threat_type)?;
                }
            }
            Self::Error { message } => map.serialize_entry("error", message)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(result: &str, threat_type: Option<&str>) -> DomainReputation {
        DomainReputation {
            result: result.to_string(),
            threat_type: threat_type.map(str::to_string),
        }
    }

    #[test]
    fn test_malicious_keeps_type() {
        let verdict = ReputationVerdict::from_report(report("malicious", Some("trojan")));
        assert_eq!(
            verdict,
            ReputationVerdict::Rated {
                status: ReputationStatus::Malicious,
                threat_type: Some("trojan".into()),
            }
        );
        assert!(!verdict.is_inconclusive());
    }

    #[test]
    fn test_malicious_without_type_defaults() {
        let verdict = ReputationVerdict::from_report(report("malicious", None));
        match verdict {
            ReputationVerdict::Rated { threat_type, .. } => {
                assert_eq!(threat_type.as_deref(), Some(UNSPECIFIED_THREAT_TYPE))
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn test_type_dropped_when_not_malicious() {
        let verdict = ReputationVerdict::from_report(report("safe", Some("ignored")));
        assert_eq!(
            verdict,
            ReputationVerdict::Rated {
                status: ReputationStatus::Other("safe".into()),
                threat_type: None,
            }
        );
    }

    #[test]
    fn test_only_exact_unknown_is_inconclusive() {
        assert!(ReputationVerdict::from_report(report("unknown", None)).is_inconclusive());
        assert!(!ReputationVerdict::from_report(report("Unknown", None)).is_inconclusive());
        assert!(!ReputationVerdict::error("timeout").is_inconclusive());
    }

    #[test]
    fn test_serializes_flat() {
        let malicious = ReputationVerdict::from_report(report("malicious", Some("trojan")));
        assert_eq!(
            serde_json::to_value(&malicious).unwrap(),
            serde_json::json!({"status": "malicious", "type": "trojan"})
        );

        let error = ReputationVerdict::error("500, boom");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({"error": "500, boom"})
        );
    }
}
