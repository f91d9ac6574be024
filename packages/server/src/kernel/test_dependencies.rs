// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseAI, BasePageRenderer, BaseReputationService, DetectionSettings, DomainReputation,
    ServerDeps,
};

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: &str) -> Self {
        self.responses.lock().unwrap().push(response.to_string());
        self
    }

    /// Make every call fail as if the model endpoint were down
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all prompts that were sent
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if self.fail {
            anyhow::bail!("Network error: connection refused");
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("[totalscore: 0]".to_string())
        }
    }
}

// =============================================================================
// Mock Reputation Service
// =============================================================================

/// Canned reputation answer for one domain.
#[derive(Debug, Clone)]
pub enum MockReputation {
    Report(DomainReputation),
    Error(String),
}

pub struct MockReputationService {
    responses: Arc<Mutex<HashMap<String, MockReputation>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockReputationService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer lookups of `domain` with `result` (and optional threat type)
    pub fn with_result(self, domain: &str, result: &str, threat_type: Option<&str>) -> Self {
        self.responses.lock().unwrap().insert(
            domain.to_string(),
            MockReputation::Report(DomainReputation {
                result: result.to_string(),
                threat_type: threat_type.map(str::to_string),
            }),
        );
        self
    }

    /// Make lookups of `domain` fail with `message`
    pub fn with_error(self, domain: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), MockReputation::Error(message.to_string()));
        self
    }

    /// Get all domains that were looked up
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_checked(&self, domain: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|d| d == domain)
    }
}

impl Default for MockReputationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseReputationService for MockReputationService {
    async fn lookup(&self, domain: &str) -> Result<DomainReputation> {
        self.calls.lock().unwrap().push(domain.to_string());

        match self.responses.lock().unwrap().get(domain).cloned() {
            Some(MockReputation::Report(report)) => Ok(report),
            Some(MockReputation::Error(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(DomainReputation {
                result: "unknown".to_string(),
                threat_type: None,
            }),
        }
    }
}

// =============================================================================
// Mock Page Renderer
// =============================================================================

pub struct MockPageRenderer {
    pages: Arc<Mutex<HashMap<String, String>>>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageRenderer {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sleep for `delay` before every render, like a slow page load
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Serve `html` when `url` is rendered. Unknown URLs fail to render.
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Get all URLs that were rendered
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_rendered(&self, url: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|u| u == url)
    }
}

impl Default for MockPageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePageRenderer for MockPageRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("net::ERR_NAME_NOT_RESOLVED for {}", url))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock dependency set. Keeps handles on every mock so tests can assert on
/// the calls made through `ServerDeps`.
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub reputation: Arc<MockReputationService>,
    pub renderer: Arc<MockPageRenderer>,
    pub settings: DetectionSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            reputation: Arc::new(MockReputationService::new()),
            renderer: Arc::new(MockPageRenderer::new()),
            settings: DetectionSettings::default(),
        }
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn mock_reputation(mut self, reputation: MockReputationService) -> Self {
        self.reputation = Arc::new(reputation);
        self
    }

    pub fn mock_renderer(mut self, renderer: MockPageRenderer) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn prompt_char_budget(mut self, budget: usize) -> Self {
        self.settings.prompt_char_budget = budget;
        self
    }

    /// Build a ServerDeps sharing these mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.ai.clone(),
            self.reputation.clone(),
            self.renderer.clone(),
            self.settings,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
