//! Data-Element Encoder: the (type-tag, byte-length, payload, padding) quad.

use tinymat_core::{
    format::type_code,
    validation::{align_to_8, calculate_padding},
    ByteSink, MatError, ALIGNMENT_BOUNDARY,
};

use crate::primitive::{write_u16, write_u32, write_zeros, WriteLe};

/// Emits a full data element: `type_code` (u32), `byte_length` (u32),
/// then `payload`, then zero padding to the next 8-byte boundary.
pub fn write_element<S: ByteSink>(sink: &mut S, type_code: u32, payload: &[u8]) -> Result<(), MatError> {
    write_u32(sink, type_code)?;
    write_u32(sink, payload.len() as u32)?;
    sink.write(payload)?;
    write_zeros(sink, calculate_padding(payload.len(), ALIGNMENT_BOUNDARY))
}

/// Emits a numeric array's data element from a slice of `T: WriteLe`.
pub fn write_numeric_element<S: ByteSink, T: WriteLe>(sink: &mut S, data: &[T]) -> Result<(), MatError> {
    write_u32(sink, T::TYPE_CODE)?;
    write_u32(sink, (data.len() * T::SIZE) as u32)?;
    for &value in data {
        value.write_le(sink)?;
    }
    write_zeros(sink, calculate_padding(data.len() * T::SIZE, ALIGNMENT_BOUNDARY))
}

/// Small-element form: a `type_code`/`byte_length` pair packed as u16s
/// sharing the first 4 bytes of the word, payload padded to 4 bytes,
/// filling the remaining 4. Used only for the scalar field-name-length
/// marker.
pub fn write_small_element<S: ByteSink>(sink: &mut S, ty: u32, payload: &[u8]) -> Result<(), MatError> {
    debug_assert!(payload.len() <= 4);
    write_u16(sink, ty as u16)?;
    write_u16(sink, payload.len() as u16)?;
    sink.write(payload)?;
    write_zeros(sink, 4 - payload.len())
}

/// A scalar i32 in small-element form, as used for the field-name-length
/// marker.
pub fn write_small_i32<S: ByteSink>(sink: &mut S, value: i32) -> Result<(), MatError> {
    write_small_element(sink, type_code::MI_INT32, &value.to_le_bytes())
}

/// An 8-bit string element: raw bytes tagged `miINT8`, padded to 8 bytes.
pub fn write_i8_string<S: ByteSink>(sink: &mut S, bytes: &[u8]) -> Result<(), MatError> {
    write_element(sink, type_code::MI_INT8, bytes)
}

/// A 16-bit string element: each input byte (Latin-1 codepoint) widened to
/// a little-endian u16 code unit, tagged `miUINT16`.
pub fn write_u16_string<S: ByteSink>(sink: &mut S, latin1: &[u8]) -> Result<(), MatError> {
    write_u32(sink, type_code::MI_UINT16)?;
    write_u32(sink, (latin1.len() * 2) as u32)?;
    for &byte in latin1 {
        write_u16(sink, byte as u16)?;
    }
    write_zeros(sink, calculate_padding(latin1.len() * 2, ALIGNMENT_BOUNDARY))
}

/// Effective (post-padding) length of an 8-bit string element's payload,
/// for envelope-size pre-computation. Zero for an empty string.
pub fn string8_effective_len(byte_len: usize) -> usize {
    if byte_len == 0 {
        0
    } else {
        align_to_8(byte_len)
    }
}

/// Effective (post-padding) length of a 16-bit string element's payload.
pub fn string16_effective_len(char_count: usize) -> usize {
    string8_effective_len(char_count * 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferedSink;

    #[test]
    fn write_element_pads_to_eight() {
        let mut sink = BufferedSink::in_memory(64);
        write_element(&mut sink, type_code::MI_INT8, b"abc").unwrap();
        // 8-byte tag + 3-byte payload + 5-byte pad = 16
        assert_eq!(sink.as_bytes().len(), 16);
    }

    #[test]
    fn small_element_is_exactly_eight_bytes() {
        let mut sink = BufferedSink::in_memory(64);
        write_small_i32(&mut sink, 32).unwrap();
        assert_eq!(sink.as_bytes().len(), 8);
        assert_eq!(&sink.as_bytes()[0..2], &(type_code::MI_INT32 as u16).to_le_bytes());
        assert_eq!(&sink.as_bytes()[2..4], &4u16.to_le_bytes());
        assert_eq!(&sink.as_bytes()[4..8], &32i32.to_le_bytes());
    }

    #[test]
    fn u16_string_widens_latin1_bytes() {
        let mut sink = BufferedSink::in_memory(64);
        write_u16_string(&mut sink, b"hi").unwrap();
        // tag(8) + 2 chars * 2 bytes = 4, padded to 8 -> 16 total
        assert_eq!(sink.as_bytes().len(), 16);
        assert_eq!(&sink.as_bytes()[8..10], &(b'h' as u16).to_le_bytes());
        assert_eq!(&sink.as_bytes()[10..12], &(b'i' as u16).to_le_bytes());
    }

    #[test]
    fn string_effective_len_zero_for_empty() {
        assert_eq!(string8_effective_len(0), 0);
        assert_eq!(string16_effective_len(0), 0);
    }
}
