//! The 128-byte file-level header that precedes every MAT-v5 file body.
//!
//! This module defines pure byte-layout: no I/O, no clock access. The
//! `tinymat` writer fills in the description text (which needs a
//! timestamp) and hands the finished bytes to the sink.

use super::constants::{DESCRIPTION_SIZE, ENDIAN_MARKER, FILE_HEADER_SIZE, FILE_VERSION, RESERVED_SIZE};

/// The fixed 128-byte preamble of a MAT-v5 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    /// ASCII description, right-padded with spaces to [`DESCRIPTION_SIZE`].
    pub description: [u8; DESCRIPTION_SIZE],
}

impl FileHeader {
    /// Total size of the header on disk.
    pub const SIZE: usize = FILE_HEADER_SIZE;

    /// Build a header from a description string, truncating to
    /// [`DESCRIPTION_SIZE`] bytes and right-padding the remainder with spaces.
    pub fn new(description: &str) -> Self {
        let mut bytes = [b' '; DESCRIPTION_SIZE];
        let src = description.as_bytes();
        let len = src.len().min(DESCRIPTION_SIZE);
        bytes[..len].copy_from_slice(&src[..len]);
        Self { description: bytes }
    }

    /// Serialize the header to its on-disk representation.
    pub const fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];

        let mut i = 0;
        while i < DESCRIPTION_SIZE {
            out[i] = self.description[i];
            i += 1;
        }
        // bytes[116..124] stay zero (reserved / subsystem data offset).
        let _ = RESERVED_SIZE;

        let version_bytes = FILE_VERSION.to_le_bytes();
        out[124] = version_bytes[0];
        out[125] = version_bytes[1];
        out[126] = ENDIAN_MARKER[0];
        out[127] = ENDIAN_MARKER[1];

        out
    }
}
