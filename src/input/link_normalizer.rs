use url::Url;

pub const DEFAULT_SCHEME: &str = "http";

/// Canonicalizes user supplied seed URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkNormalizer;

impl LinkNormalizer {
    /// Adds `http://` when the value carries no scheme, then lower-cases
    /// scheme and host, drops default ports, resolves dot segments and strips
    /// the fragment. A value the parser rejects comes back scheme-prefixed but
    /// otherwise untouched, so validation downstream still sees it.
    pub fn normalize_url(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("{DEFAULT_SCHEME}://{trimmed}")
        };

        let mut parsed = match Url::parse(&with_scheme) {
            Ok(u) => u,
            Err(e) => {
                log::debug!("could not parse {with_scheme:?} for normalization: {e}");
                return with_scheme;
            }
        };
        parsed.set_fragment(None);

        let mut normalized = parsed.to_string();
        // root path is rendered bare: http://example.com, not http://example.com/
        if parsed.path() == "/" && parsed.query().is_none() && normalized.ends_with('/') {
            normalized.pop();
        }
        normalized
    }
}

#[test]
fn test_normalize_url() {
    let ln = LinkNormalizer;
    assert_eq!(ln.normalize_url("example.com"), "http://example.com");
    assert_eq!(ln.normalize_url("  example.com/  "), "http://example.com");
    assert_eq!(ln.normalize_url("HTTPS://Example.COM:443/a/./b/../c#top"), "https://example.com/a/c");
    assert_eq!(ln.normalize_url("example.com:80/?q=1"), "http://example.com/?q=1");
    assert_eq!(ln.normalize_url("localhost:8080/docs/"), "http://localhost:8080/docs/");
    assert_eq!(ln.normalize_url(""), "http://");
    assert_eq!(ln.normalize_url("exa mple.com"), "http://exa mple.com");
}
