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

//! Per-sequence statistics.
//!
//! All functions here are total: any string is a valid sequence and any
//! integer a valid power level. Sequences are treated as sequences of
//! characters, not bytes, so lengths and offsets count characters.
//!
//! ## Usage
//!
//! ```rust
//! use genestat::analysis::{find_repeating_patterns, gc_content};
//! use genestat::PatternOccurrence;
//!
//! assert_eq!(gc_content("gcAT"), 50.0);
//!
//! let patterns = find_repeating_patterns("ATATAT", 2);
//! assert_eq!(patterns[0], PatternOccurrence { pattern: "AT".to_string(), count: 3 });
//! assert_eq!(patterns[1], PatternOccurrence { pattern: "TA".to_string(), count: 2 });
//! ```
//!
use std::collections::HashSet;

use crate::config::{Config, Thresholds};
use crate::validate::ValidatedRecord;
use crate::{GeneticRecord, PatternOccurrence, PowerLevelGroup};

/// Percentage of `G` and `C` characters in `sequence`, ignoring case.
///
/// Every character counts towards the length, including ones outside
/// `ACGT`. Returns 0 for an empty sequence.
///
pub fn gc_content(
    sequence: &str,
) -> f64 {
    let mut length: usize = 0;
    let mut gc_count: usize = 0;
    sequence.chars().for_each(|c| {
        length += 1;
        if matches!(c, 'G' | 'g' | 'C' | 'c') {
            gc_count += 1;
        }
    });
    if length == 0 {
        return 0.0
    }
    (gc_count as f64 / length as f64) * 100.0
}

/// Classify `power_level` using `thresholds`.
///
/// Values below `thresholds.low` are [PowerLevelGroup::Low], values below
/// `thresholds.medium` are [PowerLevelGroup::Medium], and everything else
/// is [PowerLevelGroup::High].
///
pub fn power_level_group(
    power_level: i64,
    thresholds: &Thresholds,
) -> PowerLevelGroup {
    if power_level < thresholds.low {
        PowerLevelGroup::Low
    } else if power_level < thresholds.medium {
        PowerLevelGroup::Medium
    } else {
        PowerLevelGroup::High
    }
}

/// Find substrings that occur more than once in `sequence`.
///
/// Scans substrings of increasing length starting from `min_length`. For
/// each length every distinct substring is counted once, in order of its
/// first offset, and kept if it has at least two non-overlapping
/// occurrences. The scan stops after the first length that yields nothing
/// or once the length exceeds half of the sequence.
///
/// Counting is non-overlapping and left to right, so `"aa"` occurs once in
/// `"aaa"`.
///
/// A `min_length` of 0 is treated as 1.
///
pub fn find_repeating_patterns(
    sequence: &str,
    min_length: usize,
) -> Vec<PatternOccurrence> {
    // Byte offsets of every character boundary, including the end
    let boundaries: Vec<usize> = sequence.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(sequence.len()))
        .collect();
    let n_chars = boundaries.len() - 1;

    let mut patterns: Vec<PatternOccurrence> = Vec::new();
    let mut length = min_length.max(1);
    let mut found = true;

    while found && length <= n_chars / 2 {
        found = false;
        let mut seen: HashSet<&str> = HashSet::new();

        for start in 0..=(n_chars - length) {
            let pattern = &sequence[boundaries[start]..boundaries[start + length]];
            if !seen.insert(pattern) {
                continue
            }
            // str::matches does not overlap
            let count = sequence.matches(pattern).count();
            if count > 1 {
                found = true;
                patterns.push(PatternOccurrence { pattern: pattern.to_string(), count });
            }
        }

        length += 1;
    }

    patterns
}

/// Build a [GeneticRecord] from a validated record.
///
/// Computes the GC content, power level group, and repeating patterns
/// using the settings in `config`.
///
pub fn analyze(
    input: ValidatedRecord,
    config: &Config,
) -> GeneticRecord {
    let gc = gc_content(&input.genetic_sequence);
    let group = power_level_group(input.power_level, &config.thresholds);
    let patterns = find_repeating_patterns(&input.genetic_sequence, config.min_pattern_length);
    GeneticRecord::from_parts(input, gc, group, patterns)
}
