use serde::{Deserialize, Serialize};

/// A crawl request resolved from user input. Built once by
/// [`crate::input::ParametersResolver`] and read-only afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    seed: String,
    search_terms: Vec<String>,
    link_depth: i32,
    max_pages_limit: i32,
}

impl SearchInput {
    pub fn new(
        seed: String,
        search_terms: Vec<String>,
        link_depth: i32,
        max_pages_limit: i32,
    ) -> SearchInput {
        SearchInput {
            seed,
            search_terms,
            link_depth,
            max_pages_limit,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    pub fn link_depth(&self) -> i32 {
        self.link_depth
    }

    pub fn max_pages_limit(&self) -> i32 {
        self.max_pages_limit
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TermHits {
    pub term: String,
    pub hits: u64,
}

/// Hits found on a single crawled page, one entry per search term in the
/// order the terms were entered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub hits_by_term: Vec<TermHits>,
}

impl SearchResult {
    pub fn new(url: String, hits_by_term: Vec<TermHits>) -> SearchResult {
        SearchResult { url, hits_by_term }
    }

    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn total_hits(&self) -> u64 {
        self.hits_by_term
            .iter()
            .fold(0u64, |total, h| total.saturating_add(h.hits))
    }

    /// Row fields: url, hits per term, total.
    pub fn to_csv_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.hits_by_term.len() + 2);
        record.push(self.url.clone());
        record.extend(self.hits_by_term.iter().map(|h| h.hits.to_string()));
        record.push(self.total_hits().to_string());
        record
    }
}
