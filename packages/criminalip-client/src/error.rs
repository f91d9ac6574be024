use thiserror::Error;

pub type Result<T> = std::result::Result<T, CriminalIpError>;

#[derive(Debug, Error)]
pub enum CriminalIpError {
    /// Connection failed or the request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; the body is kept for diagnostics
    #[error("{status}, {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body is not `{"data": {"result": ...}}`
    #[error("Unexpected API response: {body}")]
    UnexpectedResponse { body: String },
}

impl From<reqwest::Error> for CriminalIpError {
    fn from(err: reqwest::Error) -> Self {
        CriminalIpError::Network(err.to_string())
    }
}
