//! LLM risk scoring.

use tracing::{debug, info, warn};

use crate::domains::detection::activities::content::analyze_content;
use crate::domains::detection::models::{parse_total_score, ExtractedUrl, PageDigest, RiskScore};
use crate::domains::detection::prompts::{build_analysis_prompt, summarize_for_prompt};
use crate::kernel::ServerDeps;

/// Reply recorded when the model call itself fails.
pub const MODEL_FAILURE_REPLY: &str = "Error processing LLM response";

/// Ask the model to score `url` from its page digest. Returns the raw reply.
///
/// One call, no retry, no conversation history. A failed call returns
/// [`MODEL_FAILURE_REPLY`], which carries no score.
pub async fn score_risk(url: &str, digest: &PageDigest, deps: &ServerDeps) -> String {
    let source = summarize_for_prompt(url, &digest.text(), deps.settings.prompt_char_budget);
    if source.truncated {
        debug!(
            url = %url,
            budget = deps.settings.prompt_char_budget,
            "Page digest truncated for prompt"
        );
    }

    let prompt = build_analysis_prompt(url, &source);

    let reply = match deps.ai.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(url = %url, error = %e, "Risk scoring call failed");
            return MODEL_FAILURE_REPLY.to_string();
        }
    };

    match parse_total_score(&reply) {
        RiskScore::Scored(score) => info!(url = %url, score, "Risk scored"),
        RiskScore::NotFound => warn!(url = %url, reply = %reply, "Model reply has no score"),
    }

    reply
}

/// Render, digest and score one URL. Returns the raw scorer reply.
pub async fn analyze_url(url: &ExtractedUrl, deps: &ServerDeps) -> String {
    let digest = analyze_content(url.normalized(), deps).await;
    score_risk(url.normalized(), &digest, deps).await
}
