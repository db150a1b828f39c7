pub mod config;
pub mod data_models;
pub mod error;
pub mod input;
pub mod output;
