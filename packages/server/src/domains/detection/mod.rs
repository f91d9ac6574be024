//! Detection domain - classifies message text as phishing, suspicious or safe
//!
//! Text → URL extraction → reputation lookup per URL → (reputation unknown)
//! rendered-page indicators → LLM risk score → verdict from the first URL.

pub mod activities;
pub mod models;
pub mod prompts;

pub use activities::{analyze_message, analyze_message_url, check_message, MessageAnalysis};
pub use models::{
    ExtractedUrl, PageDigest, PageIndicators, ReputationStatus, ReputationVerdict, RiskScore,
    UrlReport, Verdict,
};
