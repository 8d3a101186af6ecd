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

//! Batch processing of files and archives.
//!
//! Every file is detected, parsed, validated, and analysed independently.
//! Failures stay with the line, record, or file that caused them: skipped
//! lines and dropped records are listed in the [FileOutcome] of their file,
//! and files that could not be read at all are listed as [FailedFile]s in
//! the [BatchSummary]. Nothing here aborts a batch.
//!
//! Records are not stored anywhere by this module. Pass a [RecordStore] to
//! [BatchSummary::store_into] to keep them.
//!
//! ## Usage
//!
//! ```rust
//! use genestat::pipeline::{process_files, MemoryStore, RecordStore};
//! use genestat::Config;
//!
//! let files = vec![
//!     ("groot.txt".to_string(), b"character_name: Groot\naffiliation: Guardians\ngenetic_sequence: GGCC\npower_level: 80\n".to_vec()),
//!     ("broken.json".to_string(), b"[{".to_vec()),
//! ];
//!
//! let summary = process_files(&files, &Config::default());
//! assert_eq!(summary.failed_files.len(), 1);
//!
//! let mut store = MemoryStore::default();
//! summary.store_into(&mut store);
//! assert_eq!(store.records()[0].character_name(), "Groot");
//! ```
//!
use rayon::prelude::*;

use crate::archive::{is_data_entry, Archive};
use crate::analysis::analyze;
use crate::config::Config;
use crate::error::{Error, MalformedInputError, ValidationError};
use crate::format::detect;
use crate::parser::{parse_detailed, SkippedLine};
use crate::validate::validate;
use crate::{Format, GeneticRecord, RawRecord};

/// A record rejected by validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped {
    /// 0-based position of the record among the records parsed from its file.
    pub index: usize,
    pub reason: ValidationError,
}

/// Result of processing one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub name: String,
    pub format: Format,
    pub records: Vec<GeneticRecord>,
    pub dropped: Vec<Dropped>,
    pub skipped: Vec<SkippedLine>,
}

/// A file that produced no records because it could not be read.
#[derive(Debug)]
pub struct FailedFile {
    pub name: String,
    pub error: Error,
}

/// Outcomes of all files in a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub files: Vec<FileOutcome>,
    pub failed_files: Vec<FailedFile>,
    /// Archive entries that were not data files.
    pub ignored_entries: Vec<String>,
}

impl BatchSummary {
    /// Analysed records from every file in order.
    pub fn records(&self) -> impl Iterator<Item = &GeneticRecord> {
        self.files.iter().flat_map(|file| file.records.iter())
    }

    pub fn record_count(&self) -> usize {
        self.files.iter().map(|file| file.records.len()).sum()
    }

    pub fn dropped_count(&self) -> usize {
        self.files.iter().map(|file| file.dropped.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().map(|file| file.skipped.len()).sum()
    }

    /// Append the outcomes of `other` after the ones in `self`.
    pub fn merge(
        &mut self,
        mut other: BatchSummary,
    ) {
        self.files.append(&mut other.files);
        self.failed_files.append(&mut other.failed_files);
        self.ignored_entries.append(&mut other.ignored_entries);
    }

    /// Move every analysed record into `store`.
    ///
    /// Records are inserted file by file in batch order. Returns the number
    /// of records inserted.
    pub fn store_into<S: RecordStore + ?Sized>(
        self,
        store: &mut S,
    ) -> usize {
        let mut inserted: usize = 0;
        self.files.into_iter().for_each(|file| {
            file.records.into_iter().for_each(|record| {
                store.insert(record);
                inserted += 1;
            });
        });
        inserted
    }

    fn push(
        &mut self,
        name: &str,
        outcome: Result<FileOutcome, Error>,
    ) {
        match outcome {
            Ok(file) => self.files.push(file),
            Err(error) => {
                log::warn!("{}: {}", name, error);
                self.failed_files.push(FailedFile { name: name.to_string(), error });
            },
        }
    }
}

/// Somewhere to keep analysed records between batches.
pub trait RecordStore {
    fn insert(&mut self, record: GeneticRecord);

    /// Everything stored so far, in insertion order.
    fn records(&self) -> &[GeneticRecord];

    fn clear(&mut self);
}

/// [RecordStore] backed by a [Vec].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<GeneticRecord>,
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: GeneticRecord) {
        self.records.push(record);
    }

    fn records(&self) -> &[GeneticRecord] {
        &self.records
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

// Validate and analyse records in parallel, keeping input order.
fn analyze_records(
    records: &[RawRecord],
    config: &Config,
) -> (Vec<GeneticRecord>, Vec<Dropped>) {
    let results: Vec<Result<GeneticRecord, Dropped>> = records.par_iter()
        .enumerate()
        .map(|(index, record)| {
            validate(record)
                .map(|valid| analyze(valid, config))
                .map_err(|reason| Dropped { index, reason })
        })
        .collect();

    let mut analysed: Vec<GeneticRecord> = Vec::with_capacity(results.len());
    let mut dropped: Vec<Dropped> = Vec::new();
    results.into_iter().for_each(|result| match result {
        Ok(record) => analysed.push(record),
        Err(rejected) => dropped.push(rejected),
    });
    (analysed, dropped)
}

/// Detect, parse, validate, and analyse the text of one file.
///
/// ## Errors
///
/// Only a malformed JSON file fails. Undecodable lines and invalid records
/// are listed in the returned [FileOutcome].
///
pub fn process_content(
    name: &str,
    content: &str,
    config: &Config,
) -> Result<FileOutcome, MalformedInputError> {
    let format = detect(name, content);
    let parsed = parse_detailed(format, content)?;
    let (records, dropped) = analyze_records(&parsed.records, config);

    dropped.iter().for_each(|x| log::debug!("{}: dropped record {}: {}", name, x.index, x.reason));
    log::info!("{}: {} records as {}, {} dropped, {} lines skipped",
               name, records.len(), format, dropped.len(), parsed.skipped.len());

    Ok(FileOutcome {
        name: name.to_string(),
        format,
        records,
        dropped,
        skipped: parsed.skipped,
    })
}

/// Process the raw bytes of one file.
///
/// ## Errors
///
/// Fails if `bytes` is not UTF-8 or on the errors of [process_content].
///
pub fn process_entry(
    name: &str,
    bytes: &[u8],
    config: &Config,
) -> Result<FileOutcome, Error> {
    let content = String::from_utf8(bytes.to_vec())?;
    Ok(process_content(name, &content, config)?)
}

/// Process named files in parallel.
///
/// Every file is processed regardless of its name. Failed files are listed
/// in the returned [BatchSummary].
///
pub fn process_files(
    files: &[(String, Vec<u8>)],
    config: &Config,
) -> BatchSummary {
    let outcomes: Vec<Result<FileOutcome, Error>> = files.par_iter()
        .map(|(name, bytes)| process_entry(name, bytes, config))
        .collect();

    let mut summary = BatchSummary::default();
    files.iter().zip(outcomes).for_each(|((name, _), outcome)| summary.push(name, outcome));
    summary
}

/// Process every data file in a ZIP archive held in memory.
///
/// Entries are filtered with [is_data_entry] and processed in parallel.
/// Outcomes are listed in central directory order.
///
/// ## Errors
///
/// Fails only if `bytes` is not a readable ZIP archive. Unreadable entries
/// are listed in [BatchSummary::failed_files].
///
pub fn process_archive(
    bytes: &[u8],
    config: &Config,
) -> Result<BatchSummary, Error> {
    let archive = Archive::new(bytes)?;

    let mut summary = BatchSummary::default();
    let (entries, ignored): (Vec<_>, Vec<_>) = archive.entries().iter()
        .partition(|entry| is_data_entry(&entry.name));
    summary.ignored_entries = ignored.into_iter().map(|entry| entry.name.clone()).collect();

    let outcomes: Vec<Result<FileOutcome, Error>> = entries.par_iter()
        .map(|entry| {
            let data = archive.read(entry)?;
            process_entry(&entry.name, &data, config)
        })
        .collect();

    entries.iter().zip(outcomes).for_each(|(entry, outcome)| summary.push(&entry.name, outcome));
    Ok(summary)
}

// Tests
#[cfg(test)]
mod tests {

    const GROOT: &str = "character_name: Groot\naffiliation: Guardians\ngenetic_sequence: GGCCGGCC\npower_level: 80\n";
    const ROCKET: &str = "character_name: Rocket\naffiliation: Guardians\ngenetic_sequence: ATATAT\npower_level: 40\n";

    #[test]
    fn process_content_lists_dropped_records() {
        use super::{process_content, Dropped};
        use crate::error::ValidationError;
        use crate::{Config, Format};

        let data = r#"[
            {"character_name": "Groot", "affiliation": "Guardians", "genetic_sequence": "GGCC", "power_level": 80},
            {"character_name": "Nebula", "affiliation": "Guardians", "genetic_sequence": "ATGC"},
            {"character_name": "Drax", "affiliation": "Guardians", "genetic_sequence": "ATGC", "power_level": 55}
        ]"#;

        let got = process_content("guardians.json", data, &Config::default()).unwrap();

        assert_eq!(got.format, Format::Json);
        assert_eq!(got.records.len(), 2);
        assert_eq!(got.records[1].character_name(), "Drax");
        let expected = vec![Dropped { index: 1, reason: ValidationError::MissingField("power_level") }];
        assert_eq!(got.dropped, expected);
    }

    #[test]
    fn process_content_lists_skipped_lines() {
        use super::process_content;
        use crate::decoder::encode;
        use crate::{Config, Format};

        let data = format!("{}\n!!!!\n{}\n", encode(GROOT), encode(ROCKET));

        let got = process_content("secret.b64", &data, &Config::default()).unwrap();

        // "!!!!" fails the base64 character class so this is read as text
        assert_eq!(got.format, Format::PlainText);
        assert!(got.records.is_empty());

        let data = format!("{}\nQUJD\n{}\n", encode(GROOT), encode(ROCKET));

        let got = process_content("secret.b64", &data, &Config::default()).unwrap();

        assert_eq!(got.format, Format::CustomBase64);
        let names: Vec<&str> = got.records.iter().map(|x| x.character_name()).collect();
        assert_eq!(names, vec!["Groot", "Rocket"]);
        assert_eq!(got.skipped.len(), 1);
        assert_eq!(got.skipped[0].line, 2);
    }

    #[test]
    fn process_content_malformed_json() {
        use super::process_content;
        use crate::Config;
        use crate::error::MalformedInputError;

        let got = process_content("broken.json", "[{\"character_name\": ", &Config::default());

        assert!(matches!(got, Err(MalformedInputError::Json(_))));
    }

    #[test]
    fn process_files_isolates_failures() {
        use super::process_files;
        use crate::{Config, Error};

        let files = vec![
            ("groot.txt".to_string(), GROOT.as_bytes().to_vec()),
            ("broken.json".to_string(), b"{}".to_vec()),
            ("binary.txt".to_string(), vec![0xff_u8, 0xfe]),
            ("rocket.txt".to_string(), ROCKET.as_bytes().to_vec()),
        ];

        let got = process_files(&files, &Config::default());

        let names: Vec<&str> = got.records().map(|x| x.character_name()).collect();
        assert_eq!(names, vec!["Groot", "Rocket"]);
        assert_eq!(got.record_count(), 2);
        assert_eq!(got.failed_files.len(), 2);
        assert_eq!(got.failed_files[0].name, "broken.json");
        assert!(matches!(got.failed_files[1].error, Error::Utf8(_)));
    }

    #[test]
    fn process_archive_filters_entries() {
        use super::process_archive;
        use crate::Config;
        use crate::archive::tests::build_zip;

        let data = build_zip(&[
            ("batch/groot.txt", GROOT.as_bytes(), true),
            ("__MACOSX/batch/._groot.txt", b"\x00\x05\x16\x07", false),
            ("batch/readme.md", b"# roster", false),
            ("batch/rocket.txt", ROCKET.as_bytes(), false),
            ("batch/broken.json", b"not json", true),
        ]);

        let got = process_archive(&data, &Config::default()).unwrap();

        let names: Vec<&str> = got.records().map(|x| x.character_name()).collect();
        assert_eq!(names, vec!["Groot", "Rocket"]);
        assert_eq!(got.files.len(), 2);
        assert_eq!(got.failed_files.len(), 1);
        assert_eq!(got.failed_files[0].name, "batch/broken.json");
        assert_eq!(got.ignored_entries, vec!["__MACOSX/batch/._groot.txt", "batch/readme.md"]);
    }

    #[test]
    fn process_archive_keeps_hidden_files_in_subdirectories() {
        use super::process_archive;
        use crate::Config;
        use crate::archive::tests::build_zip;

        let data = build_zip(&[
            ("batch/.roster.txt", GROOT.as_bytes(), true),
            ("batch/rocket.txt", ROCKET.as_bytes(), false),
            (".roster.txt", GROOT.as_bytes(), false),
        ]);

        let got = process_archive(&data, &Config::default()).unwrap();

        let names: Vec<&str> = got.records().map(|x| x.character_name()).collect();
        assert_eq!(names, vec!["Groot", "Rocket"]);
        assert_eq!(got.ignored_entries, vec![".roster.txt"]);
    }

    #[test]
    fn process_archive_not_a_zip() {
        use super::process_archive;
        use crate::{Config, Error};

        let got = process_archive(GROOT.as_bytes(), &Config::default());

        assert!(matches!(got, Err(Error::Archive(_))));
    }

    #[test]
    fn store_into_memory_store() {
        use super::{process_files, MemoryStore, RecordStore};
        use crate::Config;
        use crate::stats::aggregate;

        let mut store = MemoryStore::default();

        let first = process_files(&[("groot.txt".to_string(), GROOT.as_bytes().to_vec())], &Config::default());
        let second = process_files(&[("rocket.txt".to_string(), ROCKET.as_bytes().to_vec())], &Config::default());
        assert_eq!(first.store_into(&mut store), 1);
        assert_eq!(second.store_into(&mut store), 1);

        // Stats are recomputed over everything stored
        let got = aggregate(store.records(), None, 10);
        assert_eq!(got.gc_content_by_character.len(), 2);
        assert_eq!(got.power_level_distribution.medium, 1);
        assert_eq!(got.power_level_distribution.high, 1);

        store.clear();
        assert!(store.records().is_empty());
    }

    #[test]
    fn merge_batches() {
        use super::{process_files, BatchSummary};
        use crate::Config;

        let mut got = BatchSummary::default();
        got.merge(process_files(&[("groot.txt".to_string(), GROOT.as_bytes().to_vec())], &Config::default()));
        got.merge(process_files(&[("bad.json".to_string(), b"[1]".to_vec())], &Config::default()));
        got.merge(process_files(&[("rocket.txt".to_string(), ROCKET.as_bytes().to_vec())], &Config::default()));

        assert_eq!(got.record_count(), 2);
        assert_eq!(got.dropped_count(), 0);
        assert_eq!(got.skipped_count(), 0);
        assert_eq!(got.failed_files.len(), 1);
    }
}
