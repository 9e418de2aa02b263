//! Container State: the stack of in-progress struct and cell frames.
//!
//! Struct frames accumulate field names as children are appended and
//! splice the resulting name table ahead of the already-written children
//! on `end_struct`. Cell frames need no such bookkeeping.

use tinymat_core::{ByteSink, MatError, MAX_FIELD_NAME_LEN, MIN_FIELD_NAME_WIDTH};

use crate::element::{write_small_i32, write_i8_string};
use crate::primitive::write_u32;

/// A single open struct or cell.
enum Frame {
    Struct {
        size_offset: u64,
        data_start: u64,
        field_names: Vec<Vec<u8>>,
    },
    Cell {
        size_offset: u64,
        data_start: u64,
    },
}

/// Stack of open containers for one [`crate::MatFile`].
#[derive(Default)]
pub struct ContainerStack {
    frames: Vec<Frame>,
}

impl ContainerStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push_struct(&mut self, size_offset: u64, data_start: u64) {
        self.frames.push(Frame::Struct {
            size_offset,
            data_start,
            field_names: Vec::new(),
        });
    }

    pub fn push_cell(&mut self, size_offset: u64, data_start: u64) {
        self.frames.push(Frame::Cell {
            size_offset,
            data_start,
        });
    }

    /// Record a child envelope's name against the nearest enclosing struct
    /// frame, walking past any intervening cell frames. A no-op if no
    /// struct frame is open. Cell frames neither collect nor block this
    /// bookkeeping.
    pub fn record_child_name(&mut self, name: &[u8]) {
        for frame in self.frames.iter_mut().rev() {
            if let Frame::Struct { field_names, .. } = frame {
                field_names.push(name.to_vec());
                return;
            }
        }
    }

    /// Finalize the struct at the top of the stack: splice its field-name
    /// table ahead of the already-written children, then back-patch the
    /// envelope size. Returns an error if the top frame is not a struct.
    pub fn end_struct<S: ByteSink>(&mut self, sink: &mut S) -> Result<(), MatError> {
        let frame = self.frames.pop().ok_or(MatError::NoOpenContainer)?;
        let (size_offset, data_start, field_names) = match frame {
            Frame::Struct {
                size_offset,
                data_start,
                field_names,
            } => (size_offset, data_start, field_names),
            other => {
                self.frames.push(other);
                return Err(MatError::NoOpenContainer);
            }
        };

        let body_end = sink.tell();
        let body_len = (body_end - data_start) as usize;
        let body = sink.read(data_start, body_len)?;

        let width = field_names
            .iter()
            .map(|n| n.len().min(MAX_FIELD_NAME_LEN) + 1)
            .max()
            .unwrap_or(0)
            .max(MIN_FIELD_NAME_WIDTH);

        let mut table = vec![0u8; field_names.len() * width];
        for (i, name) in field_names.iter().enumerate() {
            let truncated_len = name.len().min(width - 1);
            let start = i * width;
            table[start..start + truncated_len].copy_from_slice(&name[..truncated_len]);
        }

        sink.seek(data_start)?;
        write_small_i32(sink, width as i32)?;
        write_i8_string(sink, &table)?;
        sink.write(&body)?;

        patch_envelope_size(sink, size_offset)
    }

    /// Finalize the cell at the top of the stack: just back-patch the
    /// envelope size (cells collect no name table).
    pub fn end_cell<S: ByteSink>(&mut self, sink: &mut S) -> Result<(), MatError> {
        let frame = self.frames.pop().ok_or(MatError::NoOpenContainer)?;
        match frame {
            Frame::Cell { size_offset, .. } => patch_envelope_size(sink, size_offset),
            other => {
                self.frames.push(other);
                Err(MatError::NoOpenContainer)
            }
        }
    }

    /// Auto-close any remaining struct/cell frames in LIFO order, used by
    /// `MatFile::close` when the caller never paired every `start_*`.
    pub fn finalize_all<S: ByteSink>(&mut self, sink: &mut S) -> Result<(), MatError> {
        while !self.frames.is_empty() {
            match self.frames.last().unwrap() {
                Frame::Struct { .. } => self.end_struct(sink)?,
                Frame::Cell { .. } => self.end_cell(sink)?,
            }
        }
        Ok(())
    }
}

/// Seek to `size_offset`, write `tell() - size_offset - 4` as the envelope
/// size, then return to the end of the file.
pub fn patch_envelope_size<S: ByteSink>(sink: &mut S, size_offset: u64) -> Result<(), MatError> {
    let end_offset = sink.tell();
    let size = end_offset
        .checked_sub(size_offset)
        .and_then(|d| d.checked_sub(4))
        .ok_or(MatError::InvariantViolation)?;
    sink.seek(size_offset)?;
    write_u32(sink, size as u32)?;
    sink.seek(end_offset)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferedSink;

    #[test]
    fn patch_envelope_size_writes_body_length() {
        let mut sink = BufferedSink::in_memory(64);
        let size_offset = sink.tell();
        sink.write(&[0u8; 4]).unwrap();
        sink.write(b"abcdefgh").unwrap();
        patch_envelope_size(&mut sink, size_offset).unwrap();
        let patched = u32::from_le_bytes(sink.as_bytes()[0..4].try_into().unwrap());
        assert_eq!(patched, 8);
        assert_eq!(sink.tell(), 12);
    }

    #[test]
    fn record_child_name_skips_cell_frames() {
        let mut stack = ContainerStack::new();
        stack.push_struct(0, 8);
        stack.push_cell(8, 16);
        stack.record_child_name(b"x");
        match &stack.frames[0] {
            Frame::Struct { field_names, .. } => assert_eq!(field_names[0], b"x"),
            _ => panic!("expected struct frame"),
        }
    }

    #[test]
    fn record_child_name_noop_with_no_struct() {
        let mut stack = ContainerStack::new();
        stack.push_cell(0, 8);
        stack.record_child_name(b"x");
        // No panic, and nothing to inspect: cell frames don't track names.
    }

    #[test]
    fn end_struct_on_empty_stack_errors() {
        let mut stack = ContainerStack::new();
        let mut sink = BufferedSink::in_memory(64);
        assert_eq!(stack.end_struct(&mut sink), Err(MatError::NoOpenContainer));
    }
}
