//! Server dependencies for detection activities (using traits for testability)
//!
//! This module provides the dependency container used by every detection
//! activity. All external services use trait abstractions so tests can swap in
//! the doubles from `test_dependencies`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use criminalip_client::CriminalIpClient;
use gemini_client::{GeminiClient, GenerateRequest, GenerationConfig};
use std::sync::Arc;

use crate::config::{Config, DEFAULT_PROMPT_CHAR_BUDGET};
use crate::kernel::browser::HeadlessChromeRenderer;
use crate::kernel::{BaseAI, BasePageRenderer, BaseReputationService, DomainReputation};

// =============================================================================
// GeminiClient Adapter (implements BaseAI trait)
// =============================================================================

/// Wrapper around GeminiClient that implements BaseAI trait.
///
/// The model name and sampling parameters are fixed at construction so every
/// call made through the adapter is configured the same way.
pub struct GeminiAdapter {
    client: GeminiClient,
    model: String,
    generation: GenerationConfig,
}

impl GeminiAdapter {
    pub fn new(client: GeminiClient, model: impl Into<String>, generation: GenerationConfig) -> Self {
        Self {
            client,
            model: model.into(),
            generation,
        }
    }
}

#[async_trait]
impl BaseAI for GeminiAdapter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::user(prompt).config(self.generation.clone());

        let response = self
            .client
            .generate_content(&self.model, request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(response.text)
    }
}

// =============================================================================
// CriminalIpClient Adapter (implements BaseReputationService trait)
// =============================================================================

/// Wrapper around CriminalIpClient that implements BaseReputationService trait
pub struct CriminalIpAdapter(pub CriminalIpClient);

impl CriminalIpAdapter {
    pub fn new(client: CriminalIpClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseReputationService for CriminalIpAdapter {
    async fn lookup(&self, domain: &str) -> Result<DomainReputation> {
        let report = self
            .0
            .domain_reputation(domain)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(DomainReputation {
            result: report.result,
            threat_type: report.threat_type,
        })
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Tunables for the detection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionSettings {
    /// Characters allowed for the URL plus page digest inside a prompt
    pub prompt_char_budget: usize,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            prompt_char_budget: DEFAULT_PROMPT_CHAR_BUDGET,
        }
    }
}

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Language model used for risk scoring
    pub ai: Arc<dyn BaseAI>,
    pub reputation: Arc<dyn BaseReputationService>,
    pub renderer: Arc<dyn BasePageRenderer>,
    pub settings: DetectionSettings,
}

impl ServerDeps {
    pub fn new(
        ai: Arc<dyn BaseAI>,
        reputation: Arc<dyn BaseReputationService>,
        renderer: Arc<dyn BasePageRenderer>,
        settings: DetectionSettings,
    ) -> Self {
        Self {
            ai,
            reputation,
            renderer,
            settings,
        }
    }

    /// Build the production dependency set from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut gemini = GeminiClient::new(config.gemini_api_key.clone())
            .with_timeout(config.upstream_timeout)
            .context("Failed to create Gemini client")?;
        if let Some(base_url) = &config.gemini_base_url {
            gemini = gemini.with_base_url(base_url.clone());
        }

        let mut criminalip = CriminalIpClient::new(config.criminalip_api_key.clone())
            .with_timeout(config.upstream_timeout)
            .context("Failed to create Criminal IP client")?;
        if let Some(base_url) = &config.criminalip_base_url {
            criminalip = criminalip.with_base_url(base_url.clone());
        }

        let renderer = HeadlessChromeRenderer::new(config.chrome_bin.clone(), config.render_timeout)
            .no_sandbox(config.chrome_no_sandbox);

        Ok(Self::new(
            Arc::new(GeminiAdapter::new(
                gemini,
                config.gemini_model.clone(),
                config.generation_config(),
            )),
            Arc::new(CriminalIpAdapter::new(criminalip)),
            Arc::new(renderer),
            DetectionSettings {
                prompt_char_budget: config.prompt_char_budget,
            },
        ))
    }
}
