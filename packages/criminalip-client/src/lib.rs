//! Pure Criminal IP REST API client.
//!
//! A minimal client for the Criminal IP domain reputation lookup. Each call is
//! a single attempt; retries and verdict policy belong to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use criminalip_client::CriminalIpClient;
//!
//! let client = CriminalIpClient::new("your-api-key".into());
//!
//! let report = client.domain_reputation("example.com").await?;
//! println!("{} ({:?})", report.result, report.threat_type);
//! ```

pub mod error;
pub mod types;

pub use error::{CriminalIpError, Result};
pub use types::{ApiResponse, DomainReport};

use std::time::Duration;

const BASE_URL: &str = "https://api.criminalip.io/v1";

#[derive(Clone)]
pub struct CriminalIpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CriminalIpClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at another host (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every lookup by `timeout`. A timed out call surfaces as
    /// [`CriminalIpError::Network`].
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Look up the reputation of a domain or URL.
    ///
    /// The body is read as text before parsing so that a malformed response
    /// can be reported verbatim.
    pub async fn domain_reputation(&self, domain: &str) -> Result<DomainReport> {
        let url = format!("{}/quick/hash/view/domain", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("domain", domain)])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CriminalIpError::Api {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<ApiResponse<DomainReport>>(&body) {
            Ok(api_resp) => {
                tracing::debug!(domain, result = %api_resp.data.result, "Domain reputation fetched");
                Ok(api_resp.data)
            }
            Err(e) => {
                tracing::debug!(domain, error = %e, "Domain reputation body did not parse");
                Err(CriminalIpError::UnexpectedResponse { body })
            }
        }
    }
}
