//! Kernel module - server infrastructure and dependencies.

pub mod browser;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use browser::{BrowserSession, HeadlessChromeRenderer};
pub use deps::{CriminalIpAdapter, DetectionSettings, GeminiAdapter, ServerDeps};
pub use test_dependencies::{
    MockAI, MockPageRenderer, MockReputation, MockReputationService, TestDependencies,
};
pub use traits::*;
