use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_TOP_ENTRIES: usize = 10;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file receiving every search result.
    pub all_output_path: PathBuf,
    /// CSV file receiving the results with the most hits.
    pub top_output_path: PathBuf,
    /// Number of top entries written to `top_output_path`.
    pub top_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            all_output_path: PathBuf::from("output.csv"),
            top_output_path: PathBuf::from("topHitsOutput.csv"),
            top_entries: DEFAULT_TOP_ENTRIES,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        let defaults = Config::default();
        Config {
            all_output_path: env::var("WEBSEEK_ALL_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.all_output_path),
            top_output_path: env::var("WEBSEEK_TOP_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.top_output_path),
            top_entries: parse_top_entries(env::var("WEBSEEK_TOP_ENTRIES").ok().as_deref()),
        }
    }

    /// Replaces each value that was given explicitly, e.g. on the command line.
    pub fn with_overrides(
        self,
        all_output_path: Option<PathBuf>,
        top_output_path: Option<PathBuf>,
        top_entries: Option<usize>,
    ) -> Config {
        Config {
            all_output_path: all_output_path.unwrap_or(self.all_output_path),
            top_output_path: top_output_path.unwrap_or(self.top_output_path),
            top_entries: top_entries.unwrap_or(self.top_entries),
        }
    }
}

fn parse_top_entries(raw: Option<&str>) -> usize {
    match raw {
        None => DEFAULT_TOP_ENTRIES,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!(
                "WEBSEEK_TOP_ENTRIES={value:?} is not a non-negative integer, using {DEFAULT_TOP_ENTRIES}"
            );
            DEFAULT_TOP_ENTRIES
        }),
    }
}

#[test]
fn test_parse_top_entries() {
    assert_eq!(parse_top_entries(None), DEFAULT_TOP_ENTRIES);
    assert_eq!(parse_top_entries(Some("3")), 3);
    assert_eq!(parse_top_entries(Some(" 25 ")), 25);
    assert_eq!(parse_top_entries(Some("-1")), DEFAULT_TOP_ENTRIES);
    assert_eq!(parse_top_entries(Some("many")), DEFAULT_TOP_ENTRIES);
}

#[test]
fn test_with_overrides() {
    let base = Config::default();
    assert_eq!(base.clone().with_overrides(None, None, None), base);

    let overridden = base.with_overrides(Some(PathBuf::from("out/all.csv")), None, Some(3));
    assert_eq!(overridden.all_output_path, PathBuf::from("out/all.csv"));
    assert_eq!(overridden.top_output_path, PathBuf::from("topHitsOutput.csv"));
    assert_eq!(overridden.top_entries, 3);
}
