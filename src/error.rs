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

//! Errors raised while ingesting and analysing genetic records.
//!
//! Nothing in here is fatal to the caller. [DecodeError] and
//! [ValidationError] are scoped to a single line or record and are absorbed
//! by the [pipeline](crate::pipeline), which records them and moves on.
//! [MalformedInputError] and [ArchiveError] are scoped to one file or one
//! archive entry.

/// Result type for genestat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top level error wrapping the per-concern errors.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// A custom-encoded line could not be decoded.
    Decode(#[from] DecodeError),
    /// A whole input file could not be parsed.
    MalformedInput(#[from] MalformedInputError),
    /// A record is missing a field or has a field of the wrong type.
    Validation(#[from] ValidationError),
    /// The ZIP archive or one of its entries is unreadable.
    Archive(#[from] ArchiveError),
    /// Standard I/O errors.
    Io(#[from] std::io::Error),
    /// Input bytes were not valid UTF-8.
    Utf8(#[from] std::string::FromUtf8Error),
    /// Analysis settings are inconsistent.
    Config(#[from] ConfigError),
}

/// Inconsistent analysis settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("low power level threshold ({low}) exceeds the medium threshold ({medium})")]
    ThresholdOrder { low: i64, medium: i64 },

    #[error("minimum pattern length must be at least 1")]
    MinPatternLength,
}

/// Errors from the reversed base64 decoder.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The reversed text is not standard padded base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8 text.
    #[error("decoded payload is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Errors that make a whole input file unreadable.
#[derive(thiserror::Error, Debug)]
pub enum MalformedInputError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of objects")]
    NotAnArray,

    /// Element `index` of the top level array is not an object.
    #[error("element {index} of the JSON array is not an object")]
    NotAnObject { index: usize },
}

/// Reasons a raw record is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The field is present but holds a null, array or object.
    #[error("field `{field}` must be a scalar, got {kind}")]
    InvalidField { field: &'static str, kind: &'static str },

    #[error("power_level `{0}` is not an integer")]
    InvalidPowerLevel(String),
}

/// Errors from reading ZIP archives and gzip files.
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive or one of its entries is unreadable.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// Extracted data exceeds the per-entry size limit.
    #[error("{name} is larger than {limit} bytes")]
    TooLarge { name: String, limit: u64 },

    /// Corrupted compressed data or a checksum mismatch.
    #[error("I/O error while extracting: {0}")]
    Io(#[from] std::io::Error),
}
