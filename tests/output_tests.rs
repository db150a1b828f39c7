use std::fs;

use tempfile::TempDir;

use webseek::config::Config;
use webseek::data_models::{SearchResult, TermHits};
use webseek::error::OutputError;
use webseek::output::{OutputHandler, write_records};

mod test_helpers {
    use super::*;

    pub fn result(url: &str, hits: &[u64]) -> SearchResult {
        let hits_by_term = hits
            .iter()
            .enumerate()
            .map(|(i, &hits)| TermHits {
                term: format!("term{i}"),
                hits,
            })
            .collect();
        SearchResult::new(url.to_string(), hits_by_term)
    }

    pub fn handler(dir: &TempDir, top_entries: usize) -> OutputHandler {
        OutputHandler::new(
            dir.path().join("output.csv"),
            dir.path().join("topHitsOutput.csv"),
            top_entries,
        )
    }

    pub fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }
}

use test_helpers::*;

#[cfg(test)]
mod print_all_data_tests {
    use super::*;

    #[test]
    fn test_writes_one_row_per_result() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 10);
        let results = vec![
            result("http://a.com", &[1, 2]),
            result("http://b.com", &[0, 4]),
        ];

        assert_eq!(output.print_all_data(&results).unwrap(), 2);
        assert_eq!(
            read_rows(output.all_output_path()),
            vec![
                vec!["http://a.com", "1", "2", "3"],
                vec!["http://b.com", "0", "4", "4"],
            ]
        );
    }

    #[test]
    fn test_empty_results_write_empty_file() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 10);

        assert_eq!(output.print_all_data(&[]).unwrap(), 0);
        assert!(read_rows(output.all_output_path()).is_empty());
        assert_eq!(fs::read_to_string(output.all_output_path()).unwrap(), "");
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 10);
        let results = vec![result("http://a.com/?q=x,y&t=\"z\"", &[7])];

        output.print_all_data(&results).unwrap();
        let raw = fs::read_to_string(output.all_output_path()).unwrap();
        assert_eq!(raw, "\"http://a.com/?q=x,y&t=\"\"z\"\"\",7,7\n");
        assert_eq!(
            read_rows(output.all_output_path()),
            vec![vec!["http://a.com/?q=x,y&t=\"z\"", "7", "7"]]
        );
    }

    #[test]
    fn test_rows_of_different_lengths() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 10);
        let results = vec![result("http://a.com", &[1]), result("http://b.com", &[1, 2, 3])];

        assert_eq!(output.print_all_data(&results).unwrap(), 2);
        let rows = read_rows(output.all_output_path());
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 5);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let output = OutputHandler::new(
            dir.path().join("nested/deeper/all.csv"),
            dir.path().join("top.csv"),
            1,
        );
        output.print_all_data(&[result("http://a.com", &[1])]).unwrap();
        assert!(output.all_output_path().exists());
    }

    #[test]
    fn test_write_failure_is_returned() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should go
        let output = OutputHandler::new(dir.path(), dir.path().join("top.csv"), 1);

        let err = output
            .print_all_data(&[result("http://a.com", &[1])])
            .unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}

#[cfg(test)]
mod print_top_data_tests {
    use super::*;

    #[test]
    fn test_writes_top_n_in_descending_order() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 2);
        let results = vec![
            result("http://five.com", &[5]),
            result("http://one.com", &[1]),
            result("http://nine.com", &[9]),
            result("http://three.com", &[3]),
        ];

        assert_eq!(output.print_top_data_to_file(&results).unwrap(), 2);
        assert_eq!(
            read_rows(output.top_output_path()),
            vec![vec!["http://nine.com", "9", "9"], vec!["http://five.com", "5", "5"]]
        );
        // input order untouched
        assert_eq!(results[0].url, "http://five.com");
    }

    #[test]
    fn test_fewer_results_than_top_entries() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 10);
        let results = vec![result("http://a.com", &[1]), result("http://b.com", &[2, 2])];

        assert_eq!(output.print_top_data_to_file(&results).unwrap(), 2);
        let urls: Vec<String> = read_rows(output.top_output_path())
            .into_iter()
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(urls, vec!["http://b.com", "http://a.com"]);
    }

    #[test]
    fn test_zero_top_entries_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = handler(&dir, 0);
        assert_eq!(
            output
                .print_top_data_to_file(&[result("http://a.com", &[1])])
                .unwrap(),
            0
        );
        assert!(read_rows(output.top_output_path()).is_empty());
    }

    #[test]
    fn test_from_config_uses_configured_paths() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            all_output_path: dir.path().join("all.csv"),
            top_output_path: dir.path().join("top.csv"),
            top_entries: 1,
        };
        let output = OutputHandler::from_config(&config);
        let results = vec![result("http://a.com", &[1]), result("http://b.com", &[3])];

        output.print_all_data(&results).unwrap();
        output.print_top_data_to_file(&results).unwrap();
        assert_eq!(read_rows(&config.all_output_path).len(), 2);
        assert_eq!(
            read_rows(&config.top_output_path),
            vec![vec!["http://b.com", "3", "3"]]
        );
    }
}

#[test]
fn test_write_records_to_memory() {
    let mut buf = Vec::new();
    let results = vec![result("http://a.com", &[2, 3])];
    assert_eq!(write_records(&mut buf, &results).unwrap(), 1);
    assert_eq!(String::from_utf8(buf).unwrap(), "http://a.com,2,3,5\n");
}

#[test]
fn test_search_result_totals() {
    let r = result("http://a.com", &[4, 0, 6]);
    assert_eq!(r.total_hits(), 10);
    assert_eq!(r.to_csv_record(), vec!["http://a.com", "4", "0", "6", "10"]);
    assert_eq!(result("http://empty.com", &[]).total_hits(), 0);
}

#[test]
fn test_total_hits_saturates() {
    let r = result("http://big.com", &[u64::MAX, 1]);
    assert_eq!(r.total_hits(), u64::MAX);
    let max = u64::MAX.to_string();
    assert_eq!(
        r.to_csv_record(),
        vec!["http://big.com".to_string(), max.clone(), "1".to_string(), max]
    );

    let dir = TempDir::new().unwrap();
    let output = handler(&dir, 1);
    let results = vec![r, result("http://small.com", &[2])];
    assert_eq!(output.print_top_data_to_file(&results).unwrap(), 1);
    assert_eq!(read_rows(output.top_output_path())[0][0], "http://big.com");
}
