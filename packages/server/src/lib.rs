// SMS Phishing Detection - API Core
//
// Classifies message text by checking each embedded URL against a reputation
// service and, when reputation is inconclusive, rendering the page and asking
// a language model for a risk score.
//
// Detection logic lives in domains/detection; external services are reached
// only through the kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
pub use kernel::ServerDeps;
