//! Error taxonomy for MAT-v5 write operations
//!
//! Error codes are organized by category with distinct numeric ranges,
//! mirroring how this crate's lineage (binary-format writer crates)
//! classify wire/boundary/semantic failures.

/// Errors that can occur while writing a MAT-v5 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MatError {
    // Admission errors (can't even start writing) - 1-15
    /// The target path could not be created or truncated for writing.
    OpenFailed = 1,

    // Stream errors (I/O on an already-open sink) - 16-31
    /// A write, seek, flush or read-back on the sink failed.
    IoFailed = 16,

    // Invariant errors (internal bugs, not caller mistakes) - 32-47
    /// A back-patch or struct-splice seek landed outside the written region.
    InvariantViolation = 32,
    /// An `end_struct`/`end_cell` call had no matching open frame.
    NoOpenContainer = 33,
}

impl MatError {
    /// Get the error category for this error.
    pub const fn category(&self) -> ErrorCategory {
        match *self as u8 {
            1..=15 => ErrorCategory::Admission,
            16..=31 => ErrorCategory::Stream,
            32..=47 => ErrorCategory::Invariant,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Get the numeric error code.
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The sink could not be opened at all.
    Admission,
    /// I/O failed mid-stream on an open sink.
    Stream,
    /// An internal invariant was violated; this is a bug.
    Invariant,
    /// Unknown/undefined category.
    Unknown,
}

impl core::fmt::Display for MatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MatError::OpenFailed => "failed to create or truncate the target file",
            MatError::IoFailed => "sink write, seek or flush failed",
            MatError::InvariantViolation => {
                "internal back-patch or struct-splice seek out of range"
            }
            MatError::NoOpenContainer => "end_struct/end_cell called with no matching open frame",
        };
        write!(f, "{msg}")
    }
}

/// Result type for MAT-v5 write operations.
pub type Result<T> = core::result::Result<T, MatError>;
