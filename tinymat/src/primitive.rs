//! Fixed-width little-endian primitive emitters.
//!
//! Every primitive is written little-endian regardless of host order; the
//! file's `"IM"` endian marker advertises this. Built on `byteorder`, this
//! repository's established dependency for explicit-endianness I/O.

use byteorder::{LittleEndian, WriteBytesExt};
use tinymat_core::{ByteSink, MatError};

pub fn write_u8<S: ByteSink>(sink: &mut S, value: u8) -> Result<(), MatError> {
    sink.write(&[value])
}

pub fn write_i8<S: ByteSink>(sink: &mut S, value: i8) -> Result<(), MatError> {
    sink.write(&[value as u8])
}

pub fn write_u16<S: ByteSink>(sink: &mut S, value: u16) -> Result<(), MatError> {
    let mut buf = [0u8; 2];
    buf.as_mut_slice().write_u16::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_i16<S: ByteSink>(sink: &mut S, value: i16) -> Result<(), MatError> {
    let mut buf = [0u8; 2];
    buf.as_mut_slice().write_i16::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_u32<S: ByteSink>(sink: &mut S, value: u32) -> Result<(), MatError> {
    let mut buf = [0u8; 4];
    buf.as_mut_slice().write_u32::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_i32<S: ByteSink>(sink: &mut S, value: i32) -> Result<(), MatError> {
    let mut buf = [0u8; 4];
    buf.as_mut_slice().write_i32::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_u64<S: ByteSink>(sink: &mut S, value: u64) -> Result<(), MatError> {
    let mut buf = [0u8; 8];
    buf.as_mut_slice().write_u64::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_i64<S: ByteSink>(sink: &mut S, value: i64) -> Result<(), MatError> {
    let mut buf = [0u8; 8];
    buf.as_mut_slice().write_i64::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_f32<S: ByteSink>(sink: &mut S, value: f32) -> Result<(), MatError> {
    let mut buf = [0u8; 4];
    buf.as_mut_slice().write_f32::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

pub fn write_f64<S: ByteSink>(sink: &mut S, value: f64) -> Result<(), MatError> {
    let mut buf = [0u8; 8];
    buf.as_mut_slice().write_f64::<LittleEndian>(value).map_err(|_| MatError::IoFailed)?;
    sink.write(&buf)
}

/// Writes a single `Self` to a sink in the file's little-endian wire
/// format. This is the generic hook `MatPrimitive` is missing: `tinymat`
/// needs `byteorder`, which `tinymat-core` (no_std, format-definitions
/// only) does not depend on.
pub trait WriteLe: tinymat_core::MatPrimitive {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError>;
}

impl WriteLe for f64 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_f64(sink, self)
    }
}
impl WriteLe for f32 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_f32(sink, self)
    }
}
impl WriteLe for i64 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_i64(sink, self)
    }
}
impl WriteLe for u64 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_u64(sink, self)
    }
}
impl WriteLe for i32 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_i32(sink, self)
    }
}
impl WriteLe for u32 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_u32(sink, self)
    }
}
impl WriteLe for i16 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_i16(sink, self)
    }
}
impl WriteLe for u16 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_u16(sink, self)
    }
}
impl WriteLe for i8 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_i8(sink, self)
    }
}
impl WriteLe for u8 {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_u8(sink, self)
    }
}
impl WriteLe for bool {
    fn write_le<S: ByteSink>(self, sink: &mut S) -> Result<(), MatError> {
        write_u8(sink, self as u8)
    }
}

/// Write `count` zero bytes, used for end-of-element padding.
pub fn write_zeros<S: ByteSink>(sink: &mut S, count: usize) -> Result<(), MatError> {
    const CHUNK: [u8; 8] = [0u8; 8];
    let mut remaining = count;
    while remaining > 0 {
        let take = remaining.min(CHUNK.len());
        sink.write(&CHUNK[..take])?;
        remaining -= take;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferedSink;

    #[test]
    fn primitives_round_trip_little_endian() {
        let mut sink = BufferedSink::in_memory(64);
        write_u32(&mut sink, 0x0100_0000).unwrap();
        assert_eq!(sink.as_bytes(), &[0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn zeros_pad_exact_count() {
        let mut sink = BufferedSink::in_memory(64);
        write_zeros(&mut sink, 13).unwrap();
        assert_eq!(sink.as_bytes().len(), 13);
        assert!(sink.as_bytes().iter().all(|&b| b == 0));
    }
}
