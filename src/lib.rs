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

//! genestat is a library and a command-line client for:
//!
//!   - Reading character records with genetic sequences from ZIP archives of mixed text formats.
//!   - Computing GC content, power level groups, and repeating patterns for each record.
//!   - Aggregating the analysed records into collection wide or per-affiliation statistics.
//!
//! The following input formats are supported:
//!   - JSON: a `.json` file holding an array of objects.
//!   - Plain text: blocks of `key: value` lines separated by blank lines.
//!   - Custom base64: one record per line, encoded with the
//!     [reversed base64](decoder) scheme. A decoded line holds either a JSON
//!     object or a block of `key: value` lines.
//!
//! The format of a file is [detected](format::detect) from its name and
//! contents.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The genestat CLI supports the following subcommands:
//!   - `genestat stats` ingest archives or files and print collection statistics.
//!   - `genestat summary` ingest archives or files and print a summary report.
//!   - `genestat detect` print the detected format of files.
//!   - `genestat decode` decode custom base64 files to plain text.
//!   - `genestat encode` encode plain text lines to custom base64.
//!
//! Analysis thresholds are read from command line flags or from the
//! `MIN_PATTERN_LENGTH`, `TOP_PATTERNS_COUNT`, `POWER_LEVEL_LOW_THRESHOLD`,
//! and `POWER_LEVEL_MEDIUM_THRESHOLD` environment variables.
//!
//! ### Rust API
//!
//! The pipeline is made of small pure functions that can be used on their own:
//!
//!   - [detect](format::detect): guess the [Format] of a file.
//!   - [parse](parser::parse): turn file contents into [RawRecord]s.
//!   - [validate](validate::validate): check a [RawRecord] has the required fields.
//!   - [analyze](analysis::analyze): build a [GeneticRecord] from a validated record.
//!   - [aggregate](stats::aggregate): compute a [StatsReport](stats::StatsReport) over any collection of records.
//!
//! [process_archive](pipeline::process_archive) chains these together for
//! a whole ZIP archive, processing files in parallel. Failures are isolated
//! to the line, record, or file they occur in and are reported in the
//! returned [BatchSummary](pipeline::BatchSummary).
//!
//! Storing records is left to the caller through the
//! [RecordStore](pipeline::RecordStore) trait.
//!

use std::io::Read;
use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

pub mod analysis;
pub mod archive;
pub mod config;
pub mod decoder;
pub mod error;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod stats;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};

/// A record as read from an input file, before validation.
///
/// Field order follows the input.
pub type RawRecord = IndexMap<String, serde_json::Value>;

/// Supported input formats.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    Json,
    #[default]
    PlainText,
    CustomBase64,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "text" => Ok(Format::PlainText),
            "base64" => Ok(Format::CustomBase64),
            _ => Err(format!("'{}' is not a valid Format", s)),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::PlainText => write!(f, "text"),
            Format::CustomBase64 => write!(f, "base64"),
        }
    }
}

/// Coarse classification of a power level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevelGroup {
    Low,
    Medium,
    High,
}

impl PowerLevelGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerLevelGroup::Low => "low",
            PowerLevelGroup::Medium => "medium",
            PowerLevelGroup::High => "high",
        }
    }
}

impl std::fmt::Display for PowerLevelGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A substring occurring more than once in a genetic sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternOccurrence {
    pub pattern: String,
    /// Number of non-overlapping occurrences, always at least 2.
    pub count: usize,
}

/// A validated and analysed character record.
///
/// `gc_content`, `power_level_group`, and `patterns` are derived from the
/// sequence and power level when the record is built by
/// [analyze](analysis::analyze). The fields are private so that the derived
/// values cannot go out of sync with their inputs.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneticRecord {
    character_name: String,
    affiliation: String,
    genetic_sequence: String,
    power_level: i64,
    gc_content: f64,
    power_level_group: PowerLevelGroup,
    patterns: Vec<PatternOccurrence>,
}

impl GeneticRecord {
    pub(crate) fn from_parts(
        input: validate::ValidatedRecord,
        gc_content: f64,
        power_level_group: PowerLevelGroup,
        patterns: Vec<PatternOccurrence>,
    ) -> Self {
        GeneticRecord {
            character_name: input.character_name,
            affiliation: input.affiliation,
            genetic_sequence: input.genetic_sequence,
            power_level: input.power_level,
            gc_content, power_level_group, patterns,
        }
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn affiliation(&self) -> &str {
        &self.affiliation
    }

    pub fn genetic_sequence(&self) -> &str {
        &self.genetic_sequence
    }

    pub fn power_level(&self) -> i64 {
        self.power_level
    }

    /// Percentage of G and C characters in the sequence (0 to 100).
    pub fn gc_content(&self) -> f64 {
        self.gc_content
    }

    pub fn power_level_group(&self) -> PowerLevelGroup {
        self.power_level_group
    }

    /// Repeating patterns in the order they were discovered.
    pub fn patterns(&self) -> &[PatternOccurrence] {
        &self.patterns
    }
}

/// Read one input file from [Read](std::io::Read) and analyse its records.
///
/// `filename` is only used to [detect](format::detect) the format. Records
/// that fail validation and custom-encoded lines that fail to decode are
/// dropped.
///
/// ## Errors
///
/// Fails if the input is not UTF-8 or if a JSON file is malformed.
///
/// ## Usage
/// ```rust
/// use genestat::{analyze_from_read, Config, PowerLevelGroup};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b"character_name: Groot\naffiliation: Guardians\ngenetic_sequence: GGCCGGCC\npower_level: 80\n".to_vec());
///
/// let records = analyze_from_read("groot.txt", &mut input, &Config::default()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].gc_content(), 100.0);
/// assert_eq!(records[0].power_level_group(), PowerLevelGroup::High);
/// ```
///
pub fn analyze_from_read<R: Read>(
    filename: &str,
    conn_in: &mut R,
    config: &Config,
) -> Result<Vec<GeneticRecord>> {
    let mut bytes: Vec<u8> = Vec::new();
    conn_in.read_to_end(&mut bytes)?;
    let outcome = pipeline::process_entry(filename, &bytes, config)?;
    Ok(outcome.records)
}

/// Aggregate `records` and write the report as JSON to [Write](std::io::Write).
///
/// If `affiliation` is given only records with that affiliation are
/// included.
///
/// ## Usage
/// ```rust
/// use genestat::{analyze_from_read, report_to_write, Config};
/// use std::io::Cursor;
///
/// let data = r#"[{"character_name": "Groot", "affiliation": "Guardians", "genetic_sequence": "GGCC", "power_level": 80}]"#;
/// let mut input = Cursor::new(data.as_bytes().to_vec());
/// let config = Config::default();
///
/// let records = analyze_from_read("heroes.json", &mut input, &config).unwrap();
///
/// let mut output: Vec<u8> = Vec::new();
/// report_to_write(&records, None, &config, &mut output).unwrap();
///
/// let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
/// assert_eq!(report["gc_content_by_character"]["Groot"], 100.0);
/// assert_eq!(report["power_level_distribution"]["high"], 1);
/// ```
///
pub fn report_to_write<W: Write>(
    records: &[GeneticRecord],
    affiliation: Option<&str>,
    config: &Config,
    conn_out: &mut W,
) -> Result<()> {
    let report = stats::aggregate(records, affiliation, config.top_patterns_count);
    serde_json::to_writer_pretty(&mut *conn_out, &report).map_err(std::io::Error::from)?;
    conn_out.write_all(b"\n")?;
    conn_out.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    fn guardians_text() -> Vec<u8> {
        let mut data: Vec<u8> = Vec::new();
        data.append(&mut b"character_name: Groot\naffiliation: Guardians\ngenetic_sequence: GGCCGGCC\npower_level: 80\n".to_vec());
        data.append(&mut b"\n".to_vec());
        data.append(&mut b"character_name: Rocket\naffiliation: Guardians\ngenetic_sequence: ATATAT\npower_level: 40".to_vec());
        data
    }

    #[test]
    fn analyze_from_read_plain_text() {
        use super::analyze_from_read;
        use crate::{Config, PowerLevelGroup};
        use std::io::Cursor;

        let mut input = Cursor::new(guardians_text());
        let got = analyze_from_read("guardians.txt", &mut input, &Config::default()).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].character_name(), "Groot");
        assert_eq!(got[0].power_level(), 80);
        assert_eq!(got[0].power_level_group(), PowerLevelGroup::High);
        assert_eq!(got[1].character_name(), "Rocket");
        assert_eq!(got[1].power_level_group(), PowerLevelGroup::Medium);
    }

    #[test]
    fn end_to_end_guardians() {
        use super::analyze_from_read;
        use crate::Config;
        use crate::stats::aggregate;
        use std::io::Cursor;

        let mut input = Cursor::new(guardians_text());
        let records = analyze_from_read("guardians.txt", &mut input, &Config::default()).unwrap();

        let got = aggregate(&records, None, 10);

        assert_eq!(got.power_level_distribution.low, 0);
        assert_eq!(got.power_level_distribution.medium, 1);
        assert_eq!(got.power_level_distribution.high, 1);
        assert_eq!(got.gc_content_by_character.len(), 2);
        assert_eq!(got.gc_content_by_character["Groot"], 100.0);
        assert_eq!(got.gc_content_by_character["Rocket"], 0.0);
    }

    #[test]
    fn analyze_from_read_drops_invalid_records() {
        use super::analyze_from_read;
        use crate::Config;
        use std::io::Cursor;

        let data = r#"[
            {"character_name": "Groot", "affiliation": "Guardians", "genetic_sequence": "GGCC", "power_level": 80},
            {"character_name": "Nebula", "affiliation": "Guardians", "genetic_sequence": "ATGC"},
            {"character_name": "Drax", "affiliation": "Guardians", "genetic_sequence": "ATGC", "power_level": 55}
        ]"#;
        let mut input = Cursor::new(data.as_bytes().to_vec());

        let got = analyze_from_read("guardians.json", &mut input, &Config::default()).unwrap();

        let names: Vec<&str> = got.iter().map(|x| x.character_name()).collect();
        assert_eq!(names, vec!["Groot", "Drax"]);
    }

    #[test]
    fn analyze_from_read_invalid_utf8() {
        use super::analyze_from_read;
        use crate::{Config, Error};
        use std::io::Cursor;

        let mut input = Cursor::new(vec![0xff_u8, 0xfe, b'\n']);

        let got = analyze_from_read("bad.txt", &mut input, &Config::default());

        assert!(matches!(got, Err(Error::Utf8(_))));
    }

    #[test]
    fn report_to_write_filters_affiliation() {
        use super::{analyze_from_read, report_to_write};
        use crate::Config;
        use std::io::Cursor;

        let data = r#"[
            {"character_name": "Groot", "affiliation": "Guardians", "genetic_sequence": "GGCC", "power_level": 80},
            {"character_name": "Thanos", "affiliation": "Black Order", "genetic_sequence": "ATAT", "power_level": 99}
        ]"#;
        let mut input = Cursor::new(data.as_bytes().to_vec());
        let config = Config::default();
        let records = analyze_from_read("mixed.json", &mut input, &config).unwrap();

        let mut output: Vec<u8> = Vec::new();
        report_to_write(&records, Some("Black Order"), &config, &mut output).unwrap();
        let got: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(got["gc_content_by_character"].as_object().unwrap().len(), 1);
        assert_eq!(got["gc_content_by_character"]["Thanos"], 0.0);
        assert_eq!(got["common_patterns"], serde_json::json!([{"AT": 2}]));
        assert_eq!(got["power_level_distribution"]["high"], 1);
    }

    #[test]
    fn format_from_str() {
        use crate::Format;
        use std::str::FromStr;

        assert_eq!(Format::from_str("json").unwrap(), Format::Json);
        assert_eq!(Format::from_str("text").unwrap(), Format::PlainText);
        assert_eq!(Format::from_str("base64").unwrap(), Format::CustomBase64);
        assert!(Format::from_str("fasta").is_err());
        assert_eq!(Format::CustomBase64.to_string(), "base64");
    }
}
