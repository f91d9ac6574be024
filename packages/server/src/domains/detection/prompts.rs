//! LLM prompts for phishing risk scoring.
//!
//! The prompt carries the URL and a budgeted summary of the page digest.
//! Script bodies go first in the summary since executable behaviour is the
//! strongest signal; whatever does not fit is cut and marked.

use lazy_static::lazy_static;
use regex::Regex;

use crate::common::utils::take_chars;

/// Appended to the summary whenever anything was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Role given to the model ahead of the analysis request.
pub const SYSTEM_MESSAGE: &str = "I want you to act as a cyber security specialist.";

/// Prompt for scoring a page. `{url}` and `{source}` are substituted.
pub const ANALYSIS_PROMPT: &str = r#"Analyze the following web page source code and decide whether it belongs to a phishing site. Keep false positives to a minimum and look for decisive indicators across these four features:

1. Suspicious HTML tags: <input>, <a>, <iframe>
2. Domain and URL structure: {url}
3. External resources: objects loaded from a server other than the site itself
4. JavaScript: redirects or data transmission to a third party

Source code:
{source}

While reviewing, pay particular attention to:
- Sub domains, prefix/suffix tricks in the domain, and where anchors point
- <a> tags whose domain differs from the site's domain
- Embedded media or objects loaded from another domain
- Forms built to collect credentials and the way their data is sent
- Visible or hidden redirects toward malicious sites
- Channels through which data reaches the attacker
- Elements that expose authentication details

Score each of the four features: 25 points if you suspect phishing, 0 points otherwise. Add them up, so a page suspicious on all four features scores 100.
Do not explain the grading. Reply with the total only, in exactly this format:
[totalscore: <totalscore>]"#;

lazy_static! {
    static ref SCRIPT_BODY_REGEX: Regex = Regex::new(r"(?s)<script.*?>(.*?)</script>").unwrap();
}

/// Bodies of every `<script>` element in the digest, in document order.
pub fn script_bodies(digest: &str) -> Vec<&str> {
    SCRIPT_BODY_REGEX
        .captures_iter(digest)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Digest summary sized for the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSource {
    pub text: String,
    pub truncated: bool,
}

/// Build the source summary for `url` so that the URL plus the summary stays
/// within `budget` characters.
///
/// Script bodies come first, then the full digest. When the two do not fit,
/// the tail is dropped and [`TRUNCATION_MARKER`] closes the summary.
pub fn summarize_for_prompt(url: &str, digest: &str, budget: usize) -> PromptSource {
    let available = budget.saturating_sub(url.chars().count());
    let scripts = script_bodies(digest).join(" ");

    let full = if scripts.is_empty() {
        digest.to_string()
    } else {
        format!("{} {}", scripts, digest)
    };

    if full.chars().count() <= available {
        return PromptSource {
            text: full,
            truncated: false,
        };
    }

    let marker_len = TRUNCATION_MARKER.chars().count();
    let mut text = take_chars(&full, available.saturating_sub(marker_len)).to_string();
    text.push_str(take_chars(TRUNCATION_MARKER, available.min(marker_len)));

    PromptSource {
        text,
        truncated: true,
    }
}

/// Full text sent to the model for one URL.
pub fn build_analysis_prompt(url: &str, source: &PromptSource) -> String {
    let request = ANALYSIS_PROMPT
        .replace("{url}", url)
        .replace("{source}", &source.text);

    format!("{}\n\n{}", SYSTEM_MESSAGE, request)
}
