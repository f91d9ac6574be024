//! URL extraction from free text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::detection::models::ExtractedUrl;

lazy_static! {
    // Optional scheme, optional www., a dotted host, optional path/query.
    static ref URL_REGEX: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+(?:/[^\s]*)?"
    ).unwrap();
}

/// Every URL-shaped substring of `text`, in order of appearance.
///
/// No reachability or scheme validation happens here; duplicates are kept.
pub fn extract_urls(text: &str) -> Vec<ExtractedUrl> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| ExtractedUrl::new(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> Vec<String> {
        extract_urls(text)
            .into_iter()
            .map(|u| u.raw().to_string())
            .collect()
    }

    #[test]
    fn test_no_urls() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("Hello there, your parcel is waiting!").is_empty());
    }

    #[test]
    fn test_url_with_scheme() {
        assert_eq!(raw("Check this: http://safe-bank.com"), vec!["http://safe-bank.com"]);
    }

    #[test]
    fn test_bare_domain_with_path_and_query() {
        assert_eq!(
            raw("Verify now www.bank-secure.co.kr/login?id=42 or lose access"),
            vec!["www.bank-secure.co.kr/login?id=42"]
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(
            raw("a.example first, then https://b.example/x and a.example again"),
            vec!["a.example", "https://b.example/x", "a.example"]
        );
    }

    #[test]
    fn test_trailing_sentence_period_not_captured() {
        assert_eq!(raw("Go to example.com."), vec!["example.com"]);
    }

    #[test]
    fn test_normalized_form() {
        let urls = extract_urls("pay at shop.example/pay and https://ok.example");
        assert_eq!(urls[0].normalized(), "http://shop.example/pay");
        assert_eq!(urls[1].normalized(), "https://ok.example");
    }
}
