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
use crate::RawRecord;
use crate::decoder::decode;
use crate::parser::json::read_json_object;
use crate::parser::plain::read_block;
use crate::parser::{SkipReason, SkippedLine};

/// Parse a single custom-encoded line
///
/// The decoded text is read as a JSON object if possible and as one block
/// of `key: value` lines otherwise.
///
pub fn read_custom_line(
    line: &str,
) -> Result<RawRecord, SkipReason> {
    let decoded = decode(line)?;
    if let Some(record) = read_json_object(&decoded) {
        return Ok(record)
    }
    let record = read_block(&decoded);
    if record.is_empty() {
        return Err(SkipReason::NoFields)
    }
    Ok(record)
}

/// Parse custom-encoded records
///
/// Each non-empty line holds one record. Lines that fail to decode or that
/// decode to nothing usable are returned as [SkippedLine] and do not stop
/// the rest of the file from being read.
///
pub fn read_custom_base64(
    content: &str,
) -> (Vec<RawRecord>, Vec<SkippedLine>) {
    let mut records: Vec<RawRecord> = Vec::new();
    let mut skipped: Vec<SkippedLine> = Vec::new();

    content.split('\n').enumerate().for_each(|(idx, line)| {
        let line = line.trim();
        if line.is_empty() {
            return
        }
        match read_custom_line(line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::debug!("skipping encoded line {}: {}", idx + 1, reason);
                skipped.push(SkippedLine { line: idx + 1, reason });
            },
        }
    });

    (records, skipped)
}
