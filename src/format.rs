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
use std::sync::OnceLock;

use regex::Regex;

use crate::Format;

fn base64_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/=]+$").expect("valid regex"))
}

/// Guess the [Format] of a file from its name and contents.
///
/// Checks, in order:
///   1. a `.json` file name means [Format::Json].
///   2. any line containing `:` means [Format::PlainText].
///   3. if every non-empty line consists of base64 characters only the
///      contents are [Format::CustomBase64], otherwise [Format::PlainText].
///
/// Never fails. Contents without any signal fall back to plain text.
///
pub fn detect(
    filename: &str,
    content: &str,
) -> Format {
    if filename.ends_with(".json") {
        return Format::Json
    }

    let has_key_value = content.split('\n').any(|line| line.contains(':'));
    if has_key_value {
        return Format::PlainText
    }

    let all_base64 = content.split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .all(|line| base64_line().is_match(line));

    if all_base64 {
        Format::CustomBase64
    } else {
        Format::PlainText
    }
}
