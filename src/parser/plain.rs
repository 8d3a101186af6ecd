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
use serde_json::Value;

use crate::RawRecord;

/// Parse one block of `key: value` lines
///
/// Lines without a colon are ignored. Lines are split on the first colon
/// and both sides are trimmed. A repeated key keeps its first position and
/// takes the last value.
///
pub fn read_block(
    block: &str,
) -> RawRecord {
    let mut record = RawRecord::new();
    for line in block.split('\n') {
        if let Some((key, value)) = line.split_once(':') {
            record.insert(key.trim().to_string(), Value::String(value.trim().to_string()));
        }
    }
    record
}

/// Parse plain text records
///
/// Records are separated by blank lines. Blocks without any `key: value`
/// line produce no record.
///
pub fn read_plain_text(
    content: &str,
) -> Vec<RawRecord> {
    content.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(read_block)
        .filter(|record| !record.is_empty())
        .collect()
}
