use serde::Serialize;
use std::fmt;

/// A URL-shaped substring found in message text.
///
/// `raw` is the text exactly as matched; `normalized` always carries a scheme
/// (bare domains get `http://`), which is what the renderer and the prompt use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedUrl {
    raw: String,
    normalized: String,
}

impl ExtractedUrl {
    /// Wrap a non-empty match. Returns `None` for empty input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return None;
        }

        let normalized = if has_http_scheme(&raw) {
            raw.clone()
        } else {
            format!("http://{}", raw)
        };

        Some(Self { raw, normalized })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// `http://` or `https://`, in any case. A host that merely starts with the
/// letters "http" (`httpbin.org`) has no scheme.
fn has_http_scheme(text: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        text.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

impl fmt::Display for ExtractedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
