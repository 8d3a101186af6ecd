// genestat: Genetic record ingestion, sequence analysis and collection statistics.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct AnalysisArgs {
    // Shortest repeating pattern to look for
    #[arg(long = "min-pattern-length", env = "MIN_PATTERN_LENGTH", default_value_t = genestat::config::DEFAULT_MIN_PATTERN_LENGTH)]
    pub min_pattern_length: usize,

    // Number of patterns listed in stats
    #[arg(long = "top-patterns", env = "TOP_PATTERNS_COUNT", default_value_t = genestat::config::DEFAULT_TOP_PATTERNS_COUNT)]
    pub top_patterns_count: usize,

    // Number of affiliations listed in summary
    #[arg(long = "top-affiliations", default_value_t = genestat::config::DEFAULT_SUMMARY_TOP_COUNT)]
    pub summary_top_count: usize,

    // First power level in the medium group
    #[arg(long = "low-threshold", env = "POWER_LEVEL_LOW_THRESHOLD", default_value_t = genestat::config::DEFAULT_POWER_LEVEL_LOW_THRESHOLD, allow_negative_numbers = true)]
    pub low_threshold: i64,

    // First power level in the high group
    #[arg(long = "medium-threshold", env = "POWER_LEVEL_MEDIUM_THRESHOLD", default_value_t = genestat::config::DEFAULT_POWER_LEVEL_MEDIUM_THRESHOLD, allow_negative_numbers = true)]
    pub medium_threshold: i64,
}

#[derive(Subcommand)]
pub enum Commands {
    // Ingest archives or files and print collection statistics
    Stats {
        // Input ZIP archive(s) or .json, .txt, .b64 file(s), optionally gzipped
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Only include records with this affiliation
        #[arg(short = 'a', long = "affiliation", required = false)]
        affiliation: Option<String>,

        // Also write the analysed records as JSON
        #[arg(short = 'r', long = "records", required = false)]
        records_file: Option<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Ingest archives or files and print a summary report
    Summary {
        // Input ZIP archive(s) or .json, .txt, .b64 file(s), optionally gzipped
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Print the detected format of files
    Detect {
        // Input file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Decode custom base64 files to plain text
    Decode {
        // Input file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Encode plain text records as custom base64, one record per line
    Encode {
        // Input file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
