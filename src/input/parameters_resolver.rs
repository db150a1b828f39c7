use url::{Host, Url};

use crate::data_models::SearchInput;

/// Validation predicates for raw console input and assembly of the final
/// [`SearchInput`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ParametersResolver;

impl ParametersResolver {
    pub fn is_invalid_url(&self, url: &str) -> bool {
        !is_valid_url(url)
    }

    pub fn is_null_or_empty_string(&self, value: Option<&str>) -> bool {
        value.is_none_or(|v| v.trim().is_empty())
    }

    /// Splits a comma separated line into trimmed, non-empty, distinct terms.
    /// Order of first appearance is kept.
    pub fn split_search_terms(&self, line: &str) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for term in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !terms.iter().any(|existing| existing == term) {
                terms.push(term.to_string());
            }
        }
        terms
    }

    /// Builds the crawl request. Depth and page limit are passed through as
    /// entered, without a sign check.
    pub fn resolve_params(
        &self,
        seed: Option<&str>,
        search_terms_line: Option<&str>,
        link_depth: i32,
        max_pages_limit: i32,
    ) -> Option<SearchInput> {
        let Some(seed) = seed.filter(|s| !self.is_invalid_url(s)) else {
            log::warn!("no valid seed url was provided: {seed:?}");
            return None;
        };

        let search_terms = search_terms_line
            .map(|line| self.split_search_terms(line))
            .unwrap_or_default();
        if search_terms.is_empty() {
            log::warn!("no search terms were provided: {search_terms_line:?}");
            return None;
        }

        Some(SearchInput::new(
            seed.to_string(),
            search_terms,
            link_depth,
            max_pages_limit,
        ))
    }
}

fn is_valid_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        None => false,
    }
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    // top level label: letters, or an IDN in punycode form
    let tld = labels[labels.len() - 1];
    let tld_ok = tld.starts_with("xn--") || tld.chars().all(|c| c.is_ascii_alphabetic());

    labels_ok && tld_ok
}

#[test]
fn test_is_valid_domain() {
    assert!(is_valid_domain("example.com"));
    assert!(is_valid_domain("sub.example.co.uk"));
    assert!(is_valid_domain("my-site.org."));
    assert!(is_valid_domain("localhost"));
    assert!(is_valid_domain("xn--e1afmkfd.xn--p1ai"));

    assert!(!is_valid_domain("example"));
    assert!(!is_valid_domain("example..com"));
    assert!(!is_valid_domain("-example.com"));
    assert!(!is_valid_domain("example.c0m"));
    assert!(!is_valid_domain("under_score.com"));
}
