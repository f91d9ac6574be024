//! Detection activities - the steps of the phishing pipeline
//!
//! Each activity takes its collaborators from `ServerDeps` and never fails:
//! stage-local errors come back as degraded values (an error verdict, the
//! unreachable digest, a reply without a score).

pub mod content;
pub mod extract;
pub mod message;
pub mod reputation;
pub mod scoring;

pub use content::{analyze_content, extract_indicators};
pub use extract::extract_urls;
pub use message::{analyze_message, analyze_message_url, check_message, decide_verdict, MessageAnalysis};
pub use reputation::check_reputation;
pub use scoring::{analyze_url, score_risk, MODEL_FAILURE_REPLY};
