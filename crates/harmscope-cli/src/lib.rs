//! harmscope CLI library.
//!
//! This crate provides the command implementations behind the `harmscope`
//! binary: configuration loading, noise-source selection, and rendering of
//! analysis results as text or JSON.

pub mod commands;
pub mod logging;
