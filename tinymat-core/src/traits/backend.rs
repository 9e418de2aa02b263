//! The byte-sink abstraction every encoder layer writes through
//!
//! A pure interface, no implementations: `tinymat` supplies a direct-to-file
//! sink and a buffer-all-then-flush-on-close sink over the same trait.
//!
//! Gated on the `alloc` feature: `read` hands back an owned buffer, which is
//! the one place this crate's pure-definition layer needs an allocator.

use crate::alloc::vec::Vec;
use crate::MatError;

/// An append-oriented, seekable byte destination.
///
/// All writer layers (primitive, data-element, matrix, container) go
/// through this trait exclusively — none of them touch `std::fs::File` or
/// a `Vec<u8>` directly. This is what lets the back-patch and struct-splice
/// protocols work identically whether the session is buffered in memory
/// or streaming straight to disk.
pub trait ByteSink {
    /// Current write offset, relative to the start of the sink.
    fn tell(&self) -> u64;

    /// Move the write cursor to an absolute offset. Seeking beyond the
    /// current end of the sink or before its start is an invariant
    /// violation, not a recoverable condition.
    fn seek(&mut self, offset: u64) -> Result<(), MatError>;

    /// Append bytes at the current cursor, extending the sink if needed.
    fn write(&mut self, bytes: &[u8]) -> Result<(), MatError>;

    /// Read back a byte range. Only required for the struct-finalization
    /// splice, where already-written child envelopes must be re-read so
    /// the field-name table can be inserted ahead of them.
    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, MatError>;

    /// Flush and release any underlying resource. Called exactly once, by
    /// `MatFile::close`.
    fn close(&mut self) -> Result<(), MatError>;
}
