// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Phishing policy (when to analyze, how to score, how to map a verdict) lives in
// domains::detection and only talks to the outside world through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePageRenderer)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    ///
    /// Every call is a fresh conversation with no history.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Reputation Trait (Infrastructure - Domain reputation lookups)
// =============================================================================

/// Well-formed answer from a reputation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReputation {
    pub result: String,
    pub threat_type: Option<String>,
}

#[async_trait]
pub trait BaseReputationService: Send + Sync {
    /// Look up one domain or URL. Single attempt, no retries.
    ///
    /// Transport failures, non-2xx statuses and malformed bodies are errors;
    /// their message carries the status and body for diagnostics.
    async fn lookup(&self, domain: &str) -> Result<DomainReputation>;
}

// =============================================================================
// Page Renderer Trait (Infrastructure - Headless browser)
// =============================================================================

#[async_trait]
pub trait BasePageRenderer: Send + Sync {
    /// Render `url` with scripting enabled and return the final markup.
    ///
    /// Implementations own one isolated browser context per call and must
    /// release it on every exit path.
    async fn render(&self, url: &str) -> Result<String>;
}
