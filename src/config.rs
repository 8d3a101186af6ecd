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
use crate::error::ConfigError;

pub const DEFAULT_MIN_PATTERN_LENGTH: usize = 2;
pub const DEFAULT_TOP_PATTERNS_COUNT: usize = 10;
pub const DEFAULT_SUMMARY_TOP_COUNT: usize = 5;
pub const DEFAULT_POWER_LEVEL_LOW_THRESHOLD: i64 = 33;
pub const DEFAULT_POWER_LEVEL_MEDIUM_THRESHOLD: i64 = 66;

/// Power level cut-offs for [PowerLevelGroup](crate::PowerLevelGroup).
///
/// `low` is the first value classified as medium and `medium` the first
/// value classified as high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub low: i64,
    pub medium: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            low: DEFAULT_POWER_LEVEL_LOW_THRESHOLD,
            medium: DEFAULT_POWER_LEVEL_MEDIUM_THRESHOLD,
        }
    }
}

/// Analysis and reporting settings.
///
/// Passed explicitly to everything that needs it; there is no global
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Shortest substring length considered by pattern discovery.
    pub min_pattern_length: usize,
    /// Number of patterns kept in [StatsReport](crate::stats::StatsReport).
    pub top_patterns_count: usize,
    /// Number of affiliations kept in [Summary](crate::stats::Summary).
    pub summary_top_count: usize,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_pattern_length: DEFAULT_MIN_PATTERN_LENGTH,
            top_patterns_count: DEFAULT_TOP_PATTERNS_COUNT,
            summary_top_count: DEFAULT_SUMMARY_TOP_COUNT,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Build a checked configuration.
    ///
    /// ## Errors
    ///
    /// Fails if `min_pattern_length` is zero or if `low_threshold` is
    /// greater than `medium_threshold`.
    ///
    /// ## Usage
    ///
    /// ```rust
    /// use genestat::config::Config;
    ///
    /// let config = Config::new(3, 5, 5, 10, 90).unwrap();
    /// assert_eq!(config.thresholds.medium, 90);
    ///
    /// assert!(Config::new(2, 10, 5, 70, 30).is_err());
    /// ```
    pub fn new(
        min_pattern_length: usize,
        top_patterns_count: usize,
        summary_top_count: usize,
        low_threshold: i64,
        medium_threshold: i64,
    ) -> Result<Self, ConfigError> {
        if min_pattern_length == 0 {
            return Err(ConfigError::MinPatternLength);
        }
        if low_threshold > medium_threshold {
            return Err(ConfigError::ThresholdOrder { low: low_threshold, medium: medium_threshold });
        }
        Ok(Config {
            min_pattern_length,
            top_patterns_count,
            summary_top_count,
            thresholds: Thresholds { low: low_threshold, medium: medium_threshold },
        })
    }
}
