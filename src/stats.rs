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

//! Statistics over a collection of [GeneticRecord]s.
//!
//! Reports are computed from scratch every time from whatever records the
//! caller passes in, so they can be run over a single batch or over
//! everything a [RecordStore](crate::pipeline::RecordStore) holds.
//!
//! ## Usage
//!
//! ```rust
//! use genestat::stats::aggregate;
//! use genestat::{analyze_from_read, Config};
//! use std::io::Cursor;
//!
//! let data = "character_name: Groot\naffiliation: Guardians\ngenetic_sequence: GGCCGGCC\npower_level: 80\n\n\
//!             character_name: Rocket\naffiliation: Guardians\ngenetic_sequence: ATATAT\npower_level: 40\n";
//! let records = analyze_from_read("guardians.txt", &mut Cursor::new(data), &Config::default()).unwrap();
//!
//! let report = aggregate(&records, Some("Guardians"), 10);
//!
//! assert_eq!(report.gc_content_by_character["Groot"], 100.0);
//! assert_eq!(report.gc_content_by_character["Rocket"], 0.0);
//! assert_eq!(report.power_level_distribution.medium, 1);
//! assert_eq!(report.common_patterns[0].name, "AT");
//! assert_eq!(report.common_patterns[0].count, 3);
//! ```
//!
use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::{GeneticRecord, PowerLevelGroup};

/// A name with a summed count.
///
/// Serializes as a single-entry object `{name: count}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

impl Serialize for NamedCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.count)?;
        map.end()
    }
}

/// Number of records in each [PowerLevelGroup].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PowerLevelDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PowerLevelDistribution {
    pub fn add(&mut self, group: PowerLevelGroup) {
        match group {
            PowerLevelGroup::Low => self.low += 1,
            PowerLevelGroup::Medium => self.medium += 1,
            PowerLevelGroup::High => self.high += 1,
        }
    }

    pub fn get(&self, group: PowerLevelGroup) -> usize {
        match group {
            PowerLevelGroup::Low => self.low,
            PowerLevelGroup::Medium => self.medium,
            PowerLevelGroup::High => self.high,
        }
    }
}

/// GC content, common patterns, and power level distribution of a collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatsReport {
    /// GC content of each character. A repeated name keeps the value of its
    /// last record.
    pub gc_content_by_character: IndexMap<String, f64>,
    /// Patterns with the highest summed counts, highest first.
    pub common_patterns: Vec<NamedCount>,
    pub power_level_distribution: PowerLevelDistribution,
}

/// Collection wide averages and affiliation counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_characters: usize,
    pub average_power_level: f64,
    pub power_level_groups: PowerLevelDistribution,
    pub average_gc_content: f64,
    /// Affiliations with the most records, largest first.
    pub top_affiliations: Vec<NamedCount>,
}

// Sort by count, highest first. The sort is stable so ties keep
// first-seen order.
fn top_counts(
    counts: IndexMap<String, usize>,
    top_n: usize,
) -> Vec<NamedCount> {
    let mut ranked: Vec<NamedCount> = counts.into_iter()
        .map(|(name, count)| NamedCount { name, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    ranked
}

/// Aggregate `records` into a [StatsReport].
///
/// If `affiliation` is given only records whose affiliation equals it are
/// used. Pattern counts are summed over the selected records and the
/// `top_patterns` largest sums are kept.
///
pub fn aggregate<'a, I>(
    records: I,
    affiliation: Option<&str>,
    top_patterns: usize,
) -> StatsReport
where
    I: IntoIterator<Item = &'a GeneticRecord>,
{
    let mut gc_content_by_character: IndexMap<String, f64> = IndexMap::new();
    let mut pattern_counts: IndexMap<String, usize> = IndexMap::new();
    let mut power_level_distribution = PowerLevelDistribution::default();

    records.into_iter()
        .filter(|record| affiliation.map_or(true, |x| record.affiliation() == x))
        .for_each(|record| {
            gc_content_by_character.insert(record.character_name().to_string(), record.gc_content());
            record.patterns().iter().for_each(|occurrence| {
                *pattern_counts.entry(occurrence.pattern.clone()).or_insert(0) += occurrence.count;
            });
            power_level_distribution.add(record.power_level_group());
        });

    StatsReport {
        gc_content_by_character,
        common_patterns: top_counts(pattern_counts, top_patterns),
        power_level_distribution,
    }
}

/// Summarize `records` into a [Summary].
///
/// Averages of an empty collection are 0. The `top_affiliations` largest
/// affiliations are listed.
///
pub fn summarize<'a, I>(
    records: I,
    top_affiliations: usize,
) -> Summary
where
    I: IntoIterator<Item = &'a GeneticRecord>,
{
    let mut total_characters: usize = 0;
    let mut power_level_sum: f64 = 0.0;
    let mut gc_content_sum: f64 = 0.0;
    let mut power_level_groups = PowerLevelDistribution::default();
    let mut affiliation_counts: IndexMap<String, usize> = IndexMap::new();

    records.into_iter().for_each(|record| {
        total_characters += 1;
        power_level_sum += record.power_level() as f64;
        gc_content_sum += record.gc_content();
        power_level_groups.add(record.power_level_group());
        *affiliation_counts.entry(record.affiliation().to_string()).or_insert(0) += 1;
    });

    let (average_power_level, average_gc_content) = if total_characters > 0 {
        (power_level_sum / total_characters as f64, gc_content_sum / total_characters as f64)
    } else {
        (0.0, 0.0)
    };

    Summary {
        total_characters,
        average_power_level,
        power_level_groups,
        average_gc_content,
        top_affiliations: top_counts(affiliation_counts, top_affiliations),
    }
}
