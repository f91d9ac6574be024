//! Rendered-page content analysis.
//!
//! The page is rendered by the injected [`BasePageRenderer`](crate::kernel::BasePageRenderer)
//! and reduced to the handful of structures phishing kits rely on: a login
//! form, a login button, scripts that redirect or send data, and links or
//! iframes pointing at another host.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::domains::detection::models::{PageDigest, PageIndicators};
use crate::kernel::ServerDeps;

/// Substrings that mark a script as redirecting or transmitting data.
const SCRIPT_MARKERS: [&str; 3] = ["window.location", "ajax", "xhr"];

/// Render `url` and extract its indicators.
///
/// A render failure is not an error for the caller; it yields
/// [`PageDigest::Unreachable`] so scoring can still run.
pub async fn analyze_content(url: &str, deps: &ServerDeps) -> PageDigest {
    match deps.renderer.render(url).await {
        Ok(html) => {
            let indicators = extract_indicators(url, &html);
            debug!(
                url = %url,
                login_form = indicators.login_form.is_some(),
                login_button = indicators.login_button.is_some(),
                scripts = indicators.suspicious_scripts.len(),
                links = indicators.offsite_links.len(),
                iframes = indicators.offsite_iframes.len(),
                "Page indicators extracted"
            );
            PageDigest::Indicators(indicators)
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Error accessing website");
            PageDigest::Unreachable
        }
    }
}

/// Pull the indicator families out of rendered markup.
pub fn extract_indicators(origin: &str, html: &str) -> PageIndicators {
    let document = Html::parse_document(html);
    let origin = Url::parse(origin).ok();
    let origin_host = origin
        .as_ref()
        .and_then(|u| u.host_str())
        .map(|h| h.to_ascii_lowercase());

    let is_offsite = |reference: &str| match resolve_host(origin.as_ref(), reference) {
        Some(host) => origin_host.as_deref() != Some(host.as_str()),
        None => false,
    };

    let login_form = select(&document, "form.login-form").next().map(|el| el.html());
    let login_button = select(&document, "button.login-button").next().map(|el| el.html());

    let suspicious_scripts = select(&document, "script")
        .filter(|el| is_javascript(el))
        .filter(|el| {
            let body: String = el.text().collect();
            SCRIPT_MARKERS.iter().any(|marker| body.contains(marker))
        })
        .map(|el| el.html())
        .collect();

    let offsite_links = select(&document, "a[href]")
        .filter(|el| el.value().attr("href").is_some_and(|href| is_offsite(href)))
        .map(|el| el.html())
        .collect();

    let offsite_iframes = select(&document, "iframe[src]")
        .filter(|el| el.value().attr("src").is_some_and(|src| is_offsite(src)))
        .map(|el| el.html())
        .collect();

    PageIndicators {
        login_form,
        login_button,
        suspicious_scripts,
        offsite_links,
        offsite_iframes,
    }
}

/// Elements matching `css`; an unparseable selector matches nothing.
fn select<'a>(document: &'a Html, css: &str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let selector = Selector::parse(css).ok();
    let matches: Vec<ElementRef<'a>> = match &selector {
        Some(selector) => document.select(selector).collect(),
        None => Vec::new(),
    };
    matches.into_iter()
}

/// Untyped scripts and `text/javascript` scripts are executable; JSON,
/// templates and modules declared otherwise are not.
fn is_javascript(script: &ElementRef<'_>) -> bool {
    match script.value().attr("type") {
        None => true,
        Some(kind) => kind.trim().eq_ignore_ascii_case("text/javascript"),
    }
}

/// Host an http(s) reference points at, resolved against the page URL.
fn resolve_host(origin: Option<&Url>, reference: &str) -> Option<String> {
    let target = match origin {
        Some(base) => base.join(reference.trim()).ok()?,
        None => Url::parse(reference.trim()).ok()?,
    };

    if !matches!(target.scheme(), "http" | "https") {
        return None;
    }

    target.host_str().map(|h| h.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockPageRenderer, TestDependencies};

    const ORIGIN: &str = "http://secure-login.example/account";

    #[test]
    fn test_login_form_and_button() {
        let html = r#"<html><body>
            <form class="card login-form" action="/post"><input name="pw"></form>
            <form class="search"></form>
            <button class="btn login-button">Sign in</button>
        </body></html>"#;

        let indicators = extract_indicators(ORIGIN, html);

        let form = indicators.login_form.unwrap();
        assert!(form.starts_with("<form"));
        assert!(form.contains("login-form"));
        assert!(indicators.login_button.unwrap().contains("Sign in"));
    }

    #[test]
    fn test_only_marked_javascript_is_suspicious() {
        let html = r#"<html><head>
            <script type="text/javascript">window.location = "http://evil.example";</script>
            <script>$.ajax({url: "/steal"});</script>
            <script>var xhr = new XMLHttpRequest();</script>
            <script>console.log("hello");</script>
            <script type="application/json">{"xhr": true}</script>
        </head></html>"#;

        let indicators = extract_indicators(ORIGIN, html);

        assert_eq!(indicators.suspicious_scripts.len(), 3);
        assert!(indicators.suspicious_scripts[0].contains("window.location"));
        assert!(indicators.suspicious_scripts[1].contains("ajax"));
        assert!(indicators.suspicious_scripts[2].contains("xhr"));
    }

    #[test]
    fn test_offsite_links_by_host() {
        let html = r#"<html><body>
            <a href="/help">relative</a>
            <a href="http://secure-login.example/other">same host</a>
            <a href="https://SECURE-LOGIN.example/x">same host upper case</a>
            <a href="https://collector.example/submit">offsite</a>
            <a href="//cdn.evil.example/a.js">protocol relative</a>
            <a href="mailto:help@secure-login.example">mail</a>
            <a href="javascript:void(0)">js</a>
            <a>no href</a>
        </body></html>"#;

        let indicators = extract_indicators(ORIGIN, html);

        assert_eq!(indicators.offsite_links.len(), 2);
        assert!(indicators.offsite_links[0].contains("collector.example"));
        assert!(indicators.offsite_links[1].contains("cdn.evil.example"));
    }

    #[test]
    fn test_offsite_iframes() {
        let html = r#"<html><body>
            <iframe src="https://tracker.example/frame"></iframe>
            <iframe src="/local/frame"></iframe>
            <iframe></iframe>
        </body></html>"#;

        let indicators = extract_indicators(ORIGIN, html);

        assert_eq!(indicators.offsite_iframes.len(), 1);
        assert!(indicators.offsite_iframes[0].contains("tracker.example"));
    }

    #[test]
    fn test_benign_page_has_no_indicators() {
        let html = r#"<html><body><h1>Welcome</h1><p>Nothing to see.</p><a href="/about">About</a></body></html>"#;

        assert!(extract_indicators(ORIGIN, html).is_empty());
    }

    #[tokio::test]
    async fn test_render_failure_is_unreachable() {
        let deps = TestDependencies::new();

        let digest = analyze_content("http://down.example", &deps.server_deps()).await;

        assert_eq!(digest, PageDigest::Unreachable);
        assert!(deps.renderer.was_rendered("http://down.example"));
    }

    #[tokio::test]
    async fn test_rendered_page_is_digested() {
        let deps = TestDependencies::new().mock_renderer(MockPageRenderer::new().with_page(
            ORIGIN,
            r#"<html><body><iframe src="https://tracker.example/f"></iframe></body></html>"#,
        ));

        let digest = analyze_content(ORIGIN, &deps.server_deps()).await;

        match digest {
            PageDigest::Indicators(indicators) => assert_eq!(indicators.offsite_iframes.len(), 1),
            other => panic!("expected indicators, got {other:?}"),
        }
    }
}
