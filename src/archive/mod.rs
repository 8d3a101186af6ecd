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

//! Read entries from in-memory ZIP archives and gzip files.
//!
//! Extracted data is capped at [MAX_ENTRY_SIZE] bytes per entry unless a
//! different limit is set with [Archive::with_max_entry_size].
//!
//! ## Usage
//!
//! ```rust
//! use genestat::archive::Archive;
//! use std::io::{Cursor, Write};
//!
//! let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
//! writer.start_file("groot.txt", zip::write::SimpleFileOptions::default()).unwrap();
//! writer.write_all(b"character_name: Groot\n").unwrap();
//! let bytes = writer.finish().unwrap().into_inner();
//!
//! let archive = Archive::new(&bytes).unwrap();
//! assert_eq!(archive.entries()[0].name, "groot.txt");
//! assert_eq!(archive.read(&archive.entries()[0]).unwrap(), b"character_name: Groot\n");
//! ```
//!
use std::io::Cursor;
use std::io::Read;

use flate2::read::MultiGzDecoder;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Default limit on the extracted size of one entry.
pub const MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// Extensions of entries that may hold genetic records.
pub const DATA_EXTENSIONS: [&str; 3] = [".json", ".txt", ".b64"];

/// A file listed in the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Position in the central directory.
    pub index: usize,
    pub name: String,
    /// Uncompressed size as recorded in the archive.
    pub size: u64,
}

/// A ZIP archive borrowed from a byte slice.
#[derive(Debug)]
pub struct Archive<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    entries: Vec<Entry>,
    max_entry_size: u64,
}

// Read at most `limit` bytes, failing if there is more.
fn read_capped<R: Read>(
    conn_in: R,
    name: &str,
    limit: u64,
) -> Result<Vec<u8>, ArchiveError> {
    let mut contents: Vec<u8> = Vec::new();
    conn_in.take(limit.saturating_add(1)).read_to_end(&mut contents)?;
    if contents.len() as u64 > limit {
        return Err(ArchiveError::TooLarge { name: name.to_string(), limit })
    }
    Ok(contents)
}

impl<'a> Archive<'a> {
    /// Read the central directory of the archive in `bytes`.
    ///
    /// Entry data is not touched until [Archive::read] is called.
    ///
    /// ## Errors
    ///
    /// Returns [ArchiveError::Zip] if `bytes` is not a ZIP archive.
    ///
    pub fn new(
        bytes: &'a [u8],
    ) -> Result<Self, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut entries: Vec<Entry> = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            // Raw access lists encrypted entries without a password
            let file = archive.by_index_raw(index)?;
            entries.push(Entry { index, name: file.name().to_string(), size: file.size() });
        }

        log::debug!("archive has {} entries", entries.len());
        Ok(Self { archive, entries, max_entry_size: MAX_ENTRY_SIZE })
    }

    pub fn with_max_entry_size(
        mut self,
        max_entry_size: u64,
    ) -> Self {
        self.max_entry_size = max_entry_size;
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Extract the contents of `entry`.
    ///
    /// Takes `&self` so that entries can be read from several threads.
    ///
    /// ## Errors
    ///
    /// Fails on encrypted entries, unsupported compression methods,
    /// checksum mismatches, and entries larger than the size limit.
    ///
    pub fn read(
        &self,
        entry: &Entry,
    ) -> Result<Vec<u8>, ArchiveError> {
        if entry.size > self.max_entry_size {
            return Err(ArchiveError::TooLarge { name: entry.name.clone(), limit: self.max_entry_size })
        }
        let mut archive = self.archive.clone();
        let file = archive.by_index(entry.index)?;
        read_capped(file, &entry.name, self.max_entry_size)
    }
}

/// Decompress a gzip file of at most `limit` uncompressed bytes.
pub fn gunzip(
    name: &str,
    bytes: &[u8],
    limit: u64,
) -> Result<Vec<u8>, ArchiveError> {
    read_capped(MultiGzDecoder::new(bytes), name, limit)
}

/// Check if an archive entry name looks like a data file.
///
/// Names starting with `.` (which covers `..`) or `__MACOSX` are excluded,
/// as is anything without a `.json`, `.txt`, or `.b64` extension.
///
pub fn is_data_entry(
    name: &str,
) -> bool {
    if name.starts_with('.') || name.starts_with("__MACOSX") {
        return false
    }
    DATA_EXTENSIONS.iter().any(|extension| name.ends_with(extension))
}
