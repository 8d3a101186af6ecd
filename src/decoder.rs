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

//! Reversed base64 text encoding used by `.b64` inputs.
//!
//! A payload is produced by reversing the plain text one character at a
//! time and encoding the reversed UTF-8 bytes with standard padded base64.
//! Decoding reverses the *encoded text* character by character and then
//! decodes it, so the two directions are not mirror images of each other.
//!
//! ## Usage
//!
//! ```rust
//! use genestat::decoder::{decode, encode};
//!
//! let encoded = encode("character_name: Groot");
//! assert_eq!(decode(&encoded).unwrap(), "character_name: Groot");
//!
//! assert!(decode("not base64!").is_err());
//! ```
//!
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DecodeError;

/// Decode a single custom-encoded payload.
///
/// ## Errors
///
/// Returns [DecodeError::InvalidBase64] if the reversed input is not padded
/// standard base64 and [DecodeError::InvalidUtf8] if the decoded bytes are
/// not UTF-8.
pub fn decode(
    text: &str,
) -> Result<String, DecodeError> {
    let reversed: String = text.chars().rev().collect();
    let bytes = STANDARD.decode(reversed.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Produce a payload that [decode] turns back into `text`.
///
/// The base64 text is reversed after encoding. Reversing the plain text
/// before encoding would not round trip.
pub fn encode(
    text: &str,
) -> String {
    STANDARD.encode(text.as_bytes()).chars().rev().collect()
}
