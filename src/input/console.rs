use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::data_models::SearchInput;
use crate::error::InputError;

use super::{InputHandler, LinkNormalizer, ParametersResolver};

pub const SEED_PROMPT: &str = "Please provide a starting URL (seed) for web crawling.";
pub const SEARCH_TERMS_PROMPT: &str = "Please provide search terms separated by commas.";
pub const LINK_DEPTH_PROMPT: &str = "Please provide a link depth as a positive integer.";
pub const MAX_PAGES_PROMPT: &str = "Please provide a max pages limit as a positive integer.";

/// Values gathered so far in a console session. Fields stay unset (or zero)
/// when the session ends before they are answered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawParameters {
    pub seed: Option<String>,
    pub search_terms_line: Option<String>,
    pub link_depth: i32,
    pub max_pages_limit: i32,
}

/// Reads a single crawl request from a line oriented reader, prompting on
/// `writer`. Seed and search terms are asked for again until they pass
/// validation.
pub struct ConsoleInputHandler<R, W> {
    reader: R,
    writer: W,
    normalizer: LinkNormalizer,
    resolver: ParametersResolver,
    // tokens left over on the last integer line
    pending_tokens: VecDeque<String>,
}

impl ConsoleInputHandler<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInputHandler<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            normalizer: LinkNormalizer,
            resolver: ParametersResolver,
            pending_tokens: VecDeque::new(),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Runs the whole prompt sequence and resolves the answers.
    pub fn read_request(&mut self) -> Result<Option<SearchInput>, InputError> {
        let mut raw = RawParameters::default();
        self.read_parameters(&mut raw)?;
        Ok(self.resolve(&raw))
    }

    /// Fills `raw` field by field. On error, everything answered before the
    /// failure is already stored in `raw`.
    pub fn read_parameters(&mut self, raw: &mut RawParameters) -> Result<(), InputError> {
        raw.seed = Some(self.request_seed()?);
        raw.search_terms_line = Some(self.request_search_terms()?);

        self.prompt(LINK_DEPTH_PROMPT)?;
        raw.link_depth = self.read_integer("link depth")?;
        log::debug!("User entered link depth: {}", raw.link_depth);

        self.prompt(MAX_PAGES_PROMPT)?;
        raw.max_pages_limit = self.read_integer("max pages limit")?;
        log::debug!("User entered max pages limit: {}", raw.max_pages_limit);

        Ok(())
    }

    fn resolve(&self, raw: &RawParameters) -> Option<SearchInput> {
        self.resolver.resolve_params(
            raw.seed.as_deref(),
            raw.search_terms_line.as_deref(),
            raw.link_depth,
            raw.max_pages_limit,
        )
    }

    fn request_seed(&mut self) -> Result<String, InputError> {
        loop {
            self.prompt(SEED_PROMPT)?;
            let entered = self.read_line("seed")?;
            log::debug!("User entered seed: {entered}");
            let seed = self.normalizer.normalize_url(&entered);
            log::debug!("Normalized seed: {seed}");
            if !self.resolver.is_invalid_url(&seed) {
                return Ok(seed);
            }
        }
    }

    fn request_search_terms(&mut self) -> Result<String, InputError> {
        loop {
            self.prompt(SEARCH_TERMS_PROMPT)?;
            let line = self.read_line("search terms")?;
            log::debug!("User entered search terms: {line}");
            if !self.resolver.split_search_terms(&line).is_empty() {
                return Ok(line);
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Result<(), InputError> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Undecodable bytes are replaced rather than treated as a stream error.
    fn read_line(&mut self, field: &'static str) -> Result<String, InputError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(InputError::StreamClosed(field));
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Integers are whitespace separated tokens: blank lines are skipped and
    /// several numbers may share one line.
    fn read_integer(&mut self, field: &'static str) -> Result<i32, InputError> {
        while self.pending_tokens.is_empty() {
            let line = self.read_line(field)?;
            self.pending_tokens
                .extend(line.split_whitespace().map(str::to_string));
        }
        let Some(token) = self.pending_tokens.pop_front() else {
            return Err(InputError::StreamClosed(field));
        };
        token
            .parse()
            .map_err(|_| InputError::InvalidNumber { field, value: token })
    }
}

impl<R: BufRead, W: Write> InputHandler for ConsoleInputHandler<R, W> {
    fn crawling_parameters(&mut self) -> Vec<SearchInput> {
        let mut raw = RawParameters::default();
        if let Err(e) = self.read_parameters(&mut raw) {
            log::warn!("console input ended early: {e:#}");
        }
        self.resolve(&raw).into_iter().collect()
    }
}
