//! Concrete [`ByteSink`] implementations: direct-to-file and buffered.
//!
//! Both sinks support the same seek/write/read-back contract so the matrix
//! and container encoders never need to know which one they're writing
//! through.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tinymat_core::{ByteSink, MatError};

/// Default size hint for a [`BufferedSink`]'s staging buffer.
pub const DEFAULT_BUFFER_HINT: usize = 100 * 1024;

const DOUBLE_UNTIL: usize = 100 * 1024 * 1024;
const THREE_HALVES_UNTIL: usize = 1024 * 1024 * 1024;

/// Grows a staging buffer's capacity to cover at least `needed` bytes.
///
/// Doubles while small, then grows by 3/2 until 1 GiB, then by 6/5
/// thereafter — preserves amortized O(1) appends while bounding peak
/// overcommit on huge outputs.
fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut cap = current.max(DEFAULT_BUFFER_HINT);
    while cap < needed {
        cap = if cap < DOUBLE_UNTIL {
            cap * 2
        } else if cap < THREE_HALVES_UNTIL {
            cap + cap / 2
        } else {
            cap + cap / 5
        };
    }
    cap
}

/// An in-memory sink that writes to disk exactly once, on [`ByteSink::close`].
///
/// Keeps every seek and back-patch in RAM, which is why this is the
/// default mode.
pub struct BufferedSink {
    buffer: Vec<u8>,
    cursor: usize,
    target: Option<std::path::PathBuf>,
}

impl BufferedSink {
    /// Create a buffered sink that flushes to `path` on close.
    pub fn new<P: AsRef<Path>>(path: P, buffer_hint: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(buffer_hint.max(DEFAULT_BUFFER_HINT)),
            cursor: 0,
            target: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a buffered sink with no backing file, for in-memory use
    /// (e.g. tests that assert directly on the written bytes).
    pub fn in_memory(buffer_hint: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(buffer_hint.max(DEFAULT_BUFFER_HINT)),
            cursor: 0,
            target: None,
        }
    }

    /// Borrow the bytes written so far without closing the sink.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl ByteSink for BufferedSink {
    fn tell(&self) -> u64 {
        self.cursor as u64
    }

    fn seek(&mut self, offset: u64) -> Result<(), MatError> {
        if offset as usize > self.buffer.len() {
            return Err(MatError::InvariantViolation);
        }
        self.cursor = offset as usize;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), MatError> {
        let end = self
            .cursor
            .checked_add(bytes.len())
            .ok_or(MatError::InvariantViolation)?;
        if end > self.buffer.len() {
            let new_cap = grown_capacity(self.buffer.capacity(), end);
            self.buffer.reserve(new_cap.saturating_sub(self.buffer.capacity()));
            self.buffer.resize(end, 0);
        }
        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, MatError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(MatError::InvariantViolation)?;
        if end > self.buffer.len() {
            return Err(MatError::InvariantViolation);
        }
        Ok(self.buffer[start..end].to_vec())
    }

    fn close(&mut self) -> Result<(), MatError> {
        if let Some(path) = self.target.take() {
            let mut file = File::create(&path).map_err(|_| MatError::OpenFailed)?;
            file.write_all(&self.buffer).map_err(|_| MatError::IoFailed)?;
            file.flush().map_err(|_| MatError::IoFailed)?;
        }
        Ok(())
    }
}

/// A sink that writes straight through to an open file handle.
///
/// Every back-patch costs a real seek; offered for callers who cannot
/// afford to hold the whole output in memory.
pub struct DirectFileSink {
    file: File,
    cursor: u64,
}

impl DirectFileSink {
    /// Create or truncate `path` for direct writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, MatError> {
        let file = File::create(path).map_err(|_| MatError::OpenFailed)?;
        Ok(Self { file, cursor: 0 })
    }
}

impl ByteSink for DirectFileSink {
    fn tell(&self) -> u64 {
        self.cursor
    }

    fn seek(&mut self, offset: u64) -> Result<(), MatError> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|_| MatError::InvariantViolation)?;
        self.cursor = offset;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), MatError> {
        self.file.write_all(bytes).map_err(|_| MatError::IoFailed)?;
        self.cursor += bytes.len() as u64;
        Ok(())
    }

    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, MatError> {
        let resume_at = self.cursor;
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|_| MatError::InvariantViolation)?;
        let mut out = vec![0u8; len];
        self.file.read_exact(&mut out).map_err(|_| MatError::IoFailed)?;
        self.file
            .seek(SeekFrom::Start(resume_at))
            .map_err(|_| MatError::InvariantViolation)?;
        Ok(out)
    }

    fn close(&mut self) -> Result<(), MatError> {
        self.file.flush().map_err(|_| MatError::IoFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_sink_write_and_read_back() {
        let mut sink = BufferedSink::in_memory(DEFAULT_BUFFER_HINT);
        sink.write(b"hello world").unwrap();
        assert_eq!(sink.tell(), 11);
        assert_eq!(sink.read(0, 5).unwrap(), b"hello");
        assert_eq!(sink.read(6, 5).unwrap(), b"world");
    }

    #[test]
    fn buffered_sink_seek_then_patch() {
        let mut sink = BufferedSink::in_memory(DEFAULT_BUFFER_HINT);
        sink.write(&[0u8; 4]).unwrap();
        sink.write(b"tail").unwrap();
        sink.seek(0).unwrap();
        sink.write(&0xDEAD_BEEFu32.to_le_bytes()).unwrap();
        assert_eq!(sink.as_bytes(), &[0xEF, 0xBE, 0xAD, 0xDE, b't', b'a', b'i', b'l']);
    }

    #[test]
    fn seek_past_end_is_invariant_violation() {
        let mut sink = BufferedSink::in_memory(DEFAULT_BUFFER_HINT);
        sink.write(b"ab").unwrap();
        assert_eq!(sink.seek(5), Err(MatError::InvariantViolation));
    }

    #[test]
    fn grown_capacity_doubles_below_100mib() {
        assert_eq!(grown_capacity(1024, 2000), 2048);
    }

    #[test]
    fn grown_capacity_slows_past_100mib() {
        let grown = grown_capacity(DOUBLE_UNTIL, DOUBLE_UNTIL + 1);
        assert_eq!(grown, DOUBLE_UNTIL + DOUBLE_UNTIL / 2);
    }
}
