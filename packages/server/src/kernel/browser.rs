//! Headless Chromium page renderer.
//!
//! Each render launches its own browser process against a throwaway profile
//! directory and dumps the DOM after scripts have run. The process and the
//! profile live in a [`BrowserSession`]; dropping the session kills the
//! process and deletes the profile, so a failed navigation, a timeout or a
//! cancelled request cannot leak either.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::kernel::BasePageRenderer;

/// Renders pages by shelling out to a Chromium-compatible binary.
#[derive(Debug, Clone)]
pub struct HeadlessChromeRenderer {
    chrome_bin: String,
    timeout: Duration,
    no_sandbox: bool,
}

impl HeadlessChromeRenderer {
    pub fn new(chrome_bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            chrome_bin: chrome_bin.into(),
            timeout,
            no_sandbox: false,
        }
    }

    /// Disable Chromium's own sandbox (required when running as root in a container).
    pub fn no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    fn command(&self, url: &str, profile: &TempDir) -> Command {
        let mut cmd = Command::new(&self.chrome_bin);
        cmd.arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--incognito")
            .arg(format!("--user-data-dir={}", profile.path().display()));

        if self.no_sandbox {
            cmd.arg("--no-sandbox");
        }

        cmd.arg("--dump-dom")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// One live browser process plus its private profile directory.
pub struct BrowserSession {
    child: Child,
    // Dropped after `child`, once the process is gone.
    profile: TempDir,
}

impl BrowserSession {
    fn launch(renderer: &HeadlessChromeRenderer, url: &str) -> Result<Self> {
        let profile = tempfile::Builder::new()
            .prefix("smishguard-profile-")
            .tempdir()
            .context("Failed to create browser profile directory")?;

        let child = renderer
            .command(url, &profile)
            .spawn()
            .with_context(|| format!("Failed to launch {}", renderer.chrome_bin))?;

        Ok(Self { child, profile })
    }

    /// Wait for the DOM dump, bounded by `timeout`. Consumes the session.
    async fn dump_dom(self, url: &str, timeout: Duration) -> Result<String> {
        let Self { child, profile } = self;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.context("Failed to read browser output")?,
            Err(_) => anyhow::bail!("Rendering {} timed out after {:?}", url, timeout),
        };
        drop(profile);

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            anyhow::bail!("Browser exited with {}: {}", output.status, stderr.trim());
        }

        // Chromium still dumps an empty document when navigation fails.
        if let Some(line) = stderr.lines().find(|l| l.contains("net::ERR_")) {
            anyhow::bail!("Navigation to {} failed: {}", url, line.trim());
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.trim().is_empty() {
            anyhow::bail!("Browser returned no document for {}", url);
        }

        Ok(html)
    }
}

#[async_trait]
impl BasePageRenderer for HeadlessChromeRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        let start = Instant::now();

        let session = BrowserSession::launch(self, url)?;
        let result = session.dump_dom(url, self.timeout).await;

        match &result {
            Ok(html) => debug!(
                url = %url,
                bytes = html.len(),
                duration_ms = start.elapsed().as_millis(),
                "Page rendered"
            ),
            Err(e) => warn!(url = %url, error = %e, "Page render failed"),
        }

        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script that stands in for Chromium.
    fn fake_browser(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("fake-chrome");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh\n{}", body).unwrap();
        drop(file);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn test_render_returns_dumped_dom() {
        let dir = TempDir::new().unwrap();
        let bin = fake_browser(&dir, r#"echo "<html><body>$@</body></html>""#);
        let renderer = HeadlessChromeRenderer::new(bin, Duration::from_secs(5));

        let html = renderer.render("http://example.com/").await.unwrap();

        assert!(html.contains("--dump-dom http://example.com/"));
        assert!(html.contains("--headless=new"));
        assert!(!html.contains("--no-sandbox"));
    }

    #[tokio::test]
    async fn test_render_passes_no_sandbox_when_configured() {
        let dir = TempDir::new().unwrap();
        let bin = fake_browser(&dir, r#"echo "$@""#);
        let renderer = HeadlessChromeRenderer::new(bin, Duration::from_secs(5)).no_sandbox(true);

        let html = renderer.render("http://example.com/").await.unwrap();

        assert!(html.contains("--no-sandbox"));
    }

    #[tokio::test]
    async fn test_profile_directory_removed_after_render() {
        let dir = TempDir::new().unwrap();
        let bin = fake_browser(
            &dir,
            r#"for arg in "$@"; do case "$arg" in --user-data-dir=*) echo "${arg#--user-data-dir=}";; esac; done"#,
        );
        let renderer = HeadlessChromeRenderer::new(bin, Duration::from_secs(5));

        let output = renderer.render("http://example.com/").await.unwrap();
        let profile = std::path::PathBuf::from(output.trim());

        assert!(profile.starts_with(std::env::temp_dir()));
        assert!(!profile.exists());
    }

    #[tokio::test]
    async fn test_render_times_out() {
        let dir = TempDir::new().unwrap();
        let bin = fake_browser(&dir, "sleep 5");
        let renderer = HeadlessChromeRenderer::new(bin, Duration::from_millis(100));

        let err = renderer.render("http://slow.example/").await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_navigation_error_reported() {
        let dir = TempDir::new().unwrap();
        let bin = fake_browser(
            &dir,
            r#"echo "<html><head></head><body></body></html>"; echo "ERROR: net::ERR_NAME_NOT_RESOLVED" >&2"#,
        );
        let renderer = HeadlessChromeRenderer::new(bin, Duration::from_secs(5));

        let err = renderer.render("http://nope.invalid/").await.unwrap_err();

        assert!(err.to_string().contains("ERR_NAME_NOT_RESOLVED"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let renderer =
            HeadlessChromeRenderer::new("/nonexistent/chromium", Duration::from_secs(5));

        assert!(renderer.render("http://example.com/").await.is_err());
    }
}
