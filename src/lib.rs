//! # Bag-of-words text classification
//!
//! Train a classifier from a folder-per-class corpus and report how it does on each split.
#![forbid(unsafe_code)]

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Text cleaning and tokenization
pub mod preprocessing;

/// Utilities
pub mod utils;

/// CLI option names and parsing
pub mod cli;

/// Logging macros
#[macro_use]
extern crate log;
