//! Reputation lookup and normalization.

use tracing::{info, warn};

use crate::domains::detection::models::{ExtractedUrl, ReputationVerdict};
use crate::kernel::ServerDeps;

/// Look up one URL exactly once.
///
/// Failures never escape: they come back as [`ReputationVerdict::Error`]
/// carrying the status and body (or the raw body) of the failed call.
pub async fn check_reputation(url: &ExtractedUrl, deps: &ServerDeps) -> ReputationVerdict {
    match deps.reputation.lookup(url.raw()).await {
        Ok(report) => {
            let verdict = ReputationVerdict::from_report(report);
            info!(url = %url.raw(), reputation = ?verdict, "Reputation checked");
            verdict
        }
        Err(e) => {
            warn!(url = %url.raw(), error = %e, "Reputation lookup failed");
            ReputationVerdict::error(e.to_string())
        }
    }
}
