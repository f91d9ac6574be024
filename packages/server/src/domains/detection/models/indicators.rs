use serde::Serialize;

/// Digest used when the page could not be rendered.
pub const UNREACHABLE_DIGEST: &str = "Error accessing website";

/// Suspicious structure pulled out of a rendered page.
///
/// Every field holds outer HTML so the model sees the markup itself. Anything
/// outside these indicator families is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageIndicators {
    pub login_form: Option<String>,
    pub login_button: Option<String>,
    pub suspicious_scripts: Vec<String>,
    pub offsite_links: Vec<String>,
    pub offsite_iframes: Vec<String>,
}

impl PageIndicators {
    pub fn is_empty(&self) -> bool {
        self.login_form.is_none()
            && self.login_button.is_none()
            && self.suspicious_scripts.is_empty()
            && self.offsite_links.is_empty()
            && self.offsite_iframes.is_empty()
    }

    /// Concatenate the indicators in fixed order: form, button, scripts,
    /// links, iframes.
    pub fn digest(&self) -> String {
        self.login_form
            .iter()
            .chain(self.login_button.iter())
            .chain(self.suspicious_scripts.iter())
            .chain(self.offsite_links.iter())
            .chain(self.offsite_iframes.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Outcome of a content analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageDigest {
    Indicators(PageIndicators),
    Unreachable,
}

impl PageDigest {
    pub fn text(&self) -> String {
        match self {
            Self::Indicators(indicators) => indicators.digest(),
            Self::Unreachable => UNREACHABLE_DIGEST.to_string(),
        }
    }
}
