pub mod indicators;
pub mod report;
pub mod reputation;
pub mod score;
pub mod url;
pub mod verdict;

pub use indicators::{PageDigest, PageIndicators, UNREACHABLE_DIGEST};
pub use report::UrlReport;
pub use reputation::{ReputationStatus, ReputationVerdict, UNSPECIFIED_THREAT_TYPE};
pub use score::{parse_total_score, RiskScore};
pub use url::ExtractedUrl;
pub use verdict::Verdict;
