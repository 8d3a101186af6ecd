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

//! Parsers turning file contents into [RawRecord]s.
//!
//! Each supported [Format] has its own reader:
//!   - [read_json](json::read_json): a JSON array of objects.
//!   - [read_plain_text](plain::read_plain_text): blank-line separated blocks of `key: value` lines.
//!   - [read_custom_base64](custom::read_custom_base64): one reversed base64 payload per line.
//!
//! [parse] dispatches on the format and keeps records in input order. Only
//! JSON input can fail as a whole; custom-encoded lines that cannot be
//! decoded are skipped and reported through [parse_detailed].
//!
//! ## Usage
//!
//! ```rust
//! use genestat::Format;
//! use genestat::format::detect;
//! use genestat::parser::parse;
//!
//! let data = "character_name: Groot\npower_level: 80\n\ncharacter_name: Rocket\n";
//! let format = detect("heroes.txt", data);
//! let records = parse(format, data).unwrap();
//!
//! assert_eq!(format, Format::PlainText);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1]["character_name"], "Rocket");
//! ```
//!

// Format specific implementations
pub mod custom;
pub mod json;
pub mod plain;

use crate::Format;
use crate::RawRecord;
use crate::error::{DecodeError, MalformedInputError};

use crate::parser::custom::read_custom_base64;
use crate::parser::json::read_json;
use crate::parser::plain::read_plain_text;

/// Why a custom-encoded line produced no record.
#[derive(thiserror::Error, Debug)]
pub enum SkipReason {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("decoded line has no fields")]
    NoFields,
}

/// A custom-encoded line that was skipped.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub reason: SkipReason,
}

/// Records parsed from one input together with the lines that were skipped.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub records: Vec<RawRecord>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse `content` in `format` and report skipped lines.
///
/// ## Errors
///
/// Returns [MalformedInputError] if `format` is [Format::Json] and the
/// content is not an array of objects.
pub fn parse_detailed(
    format: Format,
    content: &str,
) -> Result<ParseOutput, MalformedInputError> {
    match format {
        Format::Json => Ok(ParseOutput { records: read_json(content)?, skipped: Vec::new() }),
        Format::PlainText => Ok(ParseOutput { records: read_plain_text(content), skipped: Vec::new() }),
        Format::CustomBase64 => {
            let (records, skipped) = read_custom_base64(content);
            Ok(ParseOutput { records, skipped })
        },
    }
}

/// Parse `content` in `format` into raw records.
///
/// Same as [parse_detailed] but drops the skipped line information.
pub fn parse(
    format: Format,
    content: &str,
) -> Result<Vec<RawRecord>, MalformedInputError> {
    Ok(parse_detailed(format, content)?.records)
}
