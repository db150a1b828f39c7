use std::cmp::Reverse;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::data_models::SearchResult;
use crate::error::OutputError;

/// Writes search results as CSV. One row per result, no header; rows are
/// `url, hits per term..., total`.
#[derive(Debug, Clone)]
pub struct OutputHandler {
    all_output_path: PathBuf,
    top_output_path: PathBuf,
    top_entries: usize,
}

impl OutputHandler {
    pub fn new(
        all_output_path: impl Into<PathBuf>,
        top_output_path: impl Into<PathBuf>,
        top_entries: usize,
    ) -> OutputHandler {
        OutputHandler {
            all_output_path: all_output_path.into(),
            top_output_path: top_output_path.into(),
            top_entries,
        }
    }

    pub fn from_config(config: &Config) -> OutputHandler {
        Self::new(
            config.all_output_path.clone(),
            config.top_output_path.clone(),
            config.top_entries,
        )
    }

    pub fn all_output_path(&self) -> &Path {
        &self.all_output_path
    }

    pub fn top_output_path(&self) -> &Path {
        &self.top_output_path
    }

    /// Writes every result. Returns the number of rows written.
    pub fn print_all_data(&self, results: &[SearchResult]) -> Result<usize, OutputError> {
        let written = write_file(&self.all_output_path, results.iter())?;
        log::info!(
            "wrote {written} search results to {}",
            self.all_output_path.display()
        );
        Ok(written)
    }

    /// Writes the `top_entries` results with the most total hits, highest
    /// first. Ties keep their input order.
    pub fn print_top_data_to_file(&self, results: &[SearchResult]) -> Result<usize, OutputError> {
        let top = top_by_total_hits(results, self.top_entries);
        let written = write_file(&self.top_output_path, top.into_iter())?;
        log::info!(
            "wrote {written} top hit results to {}",
            self.top_output_path.display()
        );
        Ok(written)
    }
}

pub fn top_by_total_hits(results: &[SearchResult], n: usize) -> Vec<&SearchResult> {
    let mut sorted: Vec<&SearchResult> = results.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.total_hits()));
    sorted.truncate(n);
    sorted
}

/// Encodes results into any sink. Fields containing delimiters or quotes are
/// quoted; rows may differ in length.
pub fn write_records<'a, W, I>(sink: W, results: I) -> Result<usize, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a SearchResult>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(sink);

    let mut written = 0usize;
    for result in results {
        let record = result.to_csv_record();
        log::debug!("{record:?}");
        writer.write_record(&record)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

fn write_file<'a, I>(path: &Path, results: I) -> Result<usize, OutputError>
where
    I: IntoIterator<Item = &'a SearchResult>,
{
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;

    write_records(file, results).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

#[test]
fn test_top_by_total_hits() {
    use crate::data_models::TermHits;

    let result = |url: &str, hits: u64| {
        SearchResult::new(
            url.to_string(),
            vec![TermHits {
                term: "rust".to_string(),
                hits,
            }],
        )
    };
    let results = vec![result("a", 5), result("b", 1), result("c", 9), result("d", 5)];

    let urls = |n| {
        top_by_total_hits(&results, n)
            .iter()
            .map(|r| r.url.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(urls(3), vec!["c", "a", "d"]);
    assert_eq!(urls(10), vec!["c", "a", "d", "b"]);
    assert!(urls(0).is_empty());
}
