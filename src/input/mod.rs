use crate::data_models::SearchInput;

pub mod console;
pub mod link_normalizer;
pub mod parameters_resolver;

pub use console::{ConsoleInputHandler, RawParameters};
pub use link_normalizer::LinkNormalizer;
pub use parameters_resolver::ParametersResolver;

/// Source of crawl requests.
pub trait InputHandler {
    /// Collects requests from the source. Problems are logged and yield an
    /// empty list instead of an error.
    fn crawling_parameters(&mut self) -> Vec<SearchInput>;
}
