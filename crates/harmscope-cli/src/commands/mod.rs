//! CLI command implementations

pub mod analyze;
pub mod capture;
pub mod config;
pub mod json_output;
pub mod spectrum;

mod common;

pub use common::RunOptions;
