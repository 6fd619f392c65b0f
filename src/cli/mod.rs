//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! fda510k binary.

use clap::{Parser, ValueEnum};

use crate::traits::DEFAULT_PAGE_SIZE;

/// Search FDA 510(k) device clearances by product code.
#[derive(Parser, Debug)]
#[command(
    name = "fda510k",
    about = "Search FDA 510(k) device clearances by product code",
    version
)]
pub struct Cli {
    /// FDA product code to search (exact match).
    pub product_code: String,

    /// Maximum number of records to return (default: unlimited).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Records fetched per API call (max 100).
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub page_size: u32,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Supported output encodings.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// A single JSON array, written after collection completes.
    Json,
    /// One JSON object per line, written as records arrive.
    Ndjson,
}
