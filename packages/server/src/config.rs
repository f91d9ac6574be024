use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use gemini_client::GenerationConfig;

/// Default Gemini model used for risk scoring
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-exp-0801";

/// Default character budget for the URL plus page digest embedded in a prompt
pub const DEFAULT_PROMPT_CHAR_BUDGET: usize = 4000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub criminalip_api_key: String,
    pub criminalip_base_url: Option<String>,
    pub chrome_bin: String,
    pub chrome_no_sandbox: bool,
    pub render_timeout: Duration,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    pub prompt_char_budget: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: parse_or("PORT", 8000)?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
            criminalip_api_key: env::var("CRIMINALIP_API_KEY")
                .context("CRIMINALIP_API_KEY must be set")?,
            criminalip_base_url: env::var("CRIMINALIP_BASE_URL").ok(),
            chrome_bin: env::var("CHROME_BIN").unwrap_or_else(|_| "chromium".to_string()),
            chrome_no_sandbox: parse_or("CHROME_NO_SANDBOX", false)?,
            render_timeout: Duration::from_secs(parse_or("RENDER_TIMEOUT_SECS", 30)?),
            upstream_timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", 30)?),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 120)?),
            prompt_char_budget: parse_or("PROMPT_CHAR_BUDGET", DEFAULT_PROMPT_CHAR_BUDGET)?,
        })
    }

    /// Sampling parameters for the risk scoring model.
    ///
    /// Temperature 0 keeps the score as repeatable as the model allows.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::default()
            .temperature(0.0)
            .top_p(0.95)
            .top_k(64)
            .max_output_tokens(8192)
    }
}

/// Read `key`, falling back to `default` when unset. A value that is set but
/// does not parse is an error.
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid {}", key, std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let value: u16 = parse_or("SMISHGUARD_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(value, 8000);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("SMISHGUARD_TEST_BAD_BUDGET", "lots");
        let result: Result<usize> = parse_or("SMISHGUARD_TEST_BAD_BUDGET", 4000);
        assert!(result.is_err());
        env::remove_var("SMISHGUARD_TEST_BAD_BUDGET");
    }

    #[test]
    fn test_parse_or_reads_bool() {
        env::set_var("SMISHGUARD_TEST_NO_SANDBOX", "true");
        let value: bool = parse_or("SMISHGUARD_TEST_NO_SANDBOX", false).unwrap();
        assert!(value);
        env::remove_var("SMISHGUARD_TEST_NO_SANDBOX");
    }

    #[test]
    fn test_generation_config_values() {
        let config = Config {
            port: 8000,
            gemini_api_key: "g".into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_base_url: None,
            criminalip_api_key: "c".into(),
            criminalip_base_url: None,
            chrome_bin: "chromium".into(),
            chrome_no_sandbox: false,
            render_timeout: Duration::from_secs(30),
            upstream_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            prompt_char_budget: DEFAULT_PROMPT_CHAR_BUDGET,
        };

        let generation = config.generation_config();
        assert_eq!(generation.temperature, Some(0.0));
        assert_eq!(generation.top_p, Some(0.95));
        assert_eq!(generation.top_k, Some(64));
        assert_eq!(generation.max_output_tokens, Some(8192));
    }
}
