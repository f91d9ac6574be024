//! Message-level pipeline and the single-URL entry point.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::domains::detection::activities::extract::extract_urls;
use crate::domains::detection::activities::reputation::check_reputation;
use crate::domains::detection::activities::scoring::analyze_url;
use crate::domains::detection::models::{parse_total_score, UrlReport, Verdict};
use crate::kernel::ServerDeps;

/// Per-URL reports of a message plus the verdict derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct MessageAnalysis {
    pub reports: Vec<UrlReport>,
    pub verdict: Verdict,
}

/// Run the full pipeline over a message.
///
/// Reputation lookups for all URLs run concurrently. Only the first URL can
/// decide the verdict, so content analysis runs for it alone, and only when
/// its reputation is exactly `unknown`. A message therefore costs at most one
/// render and one model call.
pub async fn analyze_message(text: &str, deps: &ServerDeps) -> MessageAnalysis {
    let urls = extract_urls(text);
    if urls.is_empty() {
        info!("No URLs found in message");
        return MessageAnalysis {
            reports: Vec::new(),
            verdict: Verdict::NoUrlsFound,
        };
    }

    let verdicts = join_all(urls.iter().map(|url| check_reputation(url, deps))).await;

    let mut reports: Vec<UrlReport> = urls
        .iter()
        .zip(verdicts)
        .map(|(url, reputation)| UrlReport::new(url.raw(), reputation))
        .collect();

    let skipped = reports
        .iter()
        .skip(1)
        .filter(|r| r.reputation.is_inconclusive())
        .count();
    if skipped > 0 {
        debug!(skipped, "Skipping content analysis for URLs after the first");
    }

    if let (Some(first), Some(url)) = (reports.first_mut(), urls.first()) {
        if first.reputation.is_inconclusive() {
            first.analysis = Some(analyze_url(url, deps).await);
        }
    }

    let verdict = decide_verdict(&reports);
    info!(urls = reports.len(), verdict = %verdict, "Message analyzed");

    MessageAnalysis { reports, verdict }
}

/// Verdict for a message. See [`analyze_message`].
pub async fn check_message(text: &str, deps: &ServerDeps) -> Verdict {
    analyze_message(text, deps).await.verdict
}

/// Derive the verdict from the first report alone.
///
/// Later URLs are looked up but do not influence the label.
/// A first URL without an analysis (conclusive reputation or a failed lookup)
/// reads as safe.
pub fn decide_verdict(reports: &[UrlReport]) -> Verdict {
    let Some(first) = reports.first() else {
        return Verdict::NoUrlsFound;
    };

    let reply = first.analysis.as_deref().unwrap_or_default();
    Verdict::from_score(parse_total_score(reply))
}

/// Analyze the first URL of `text` directly, without a reputation gate.
///
/// Returns the raw scorer reply, or `None` when the text has no URL.
pub async fn analyze_message_url(text: &str, deps: &ServerDeps) -> Option<String> {
    let url = extract_urls(text).into_iter().next()?;
    Some(analyze_url(&url, deps).await)
}
