//! Wire-format constants for the MAT-v5 (Level-5) binary grammar

/// Alignment boundary every data element (and its padding) must land on.
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Size in bytes of the file-level header (description + version + endian marker).
pub const FILE_HEADER_SIZE: usize = 128;

/// Size in bytes of the human-readable description field of the file header.
pub const DESCRIPTION_SIZE: usize = 116;

/// Number of reserved (subsystem data offset) bytes following the description.
pub const RESERVED_SIZE: usize = 8;

/// Struct field names are truncated to this many bytes before NUL-padding.
pub const MAX_FIELD_NAME_LEN: usize = 31;

/// The minimum per-name width `W` used for a struct's field-name table,
/// regardless of how short the actual field names are.
pub const MIN_FIELD_NAME_WIDTH: usize = 32;

/// MAT-v5 data-element type codes ("mi*" tags).
pub mod type_code {
    pub const MI_INT8: u32 = 1;
    pub const MI_UINT8: u32 = 2;
    pub const MI_INT16: u32 = 3;
    pub const MI_UINT16: u32 = 4;
    pub const MI_INT32: u32 = 5;
    pub const MI_UINT32: u32 = 6;
    pub const MI_SINGLE: u32 = 7;
    pub const MI_DOUBLE: u32 = 9;
    pub const MI_INT64: u32 = 12;
    pub const MI_UINT64: u32 = 13;
    pub const MI_MATRIX: u32 = 14;
    /// Reserved, never emitted by this encoder (no compressed payload support).
    pub const MI_COMPRESSED: u32 = 15;
    pub const MI_UTF16: u32 = 17;
    /// Reserved, never emitted by this encoder (no UTF-8 char arrays).
    pub const MI_UTF8: u32 = 16;
    /// Reserved, never emitted by this encoder (no UTF-32 char arrays).
    pub const MI_UTF32: u32 = 18;
}

/// MAT-v5 array-class codes carried in the low byte of the array-flags word.
pub mod class_code {
    pub const MX_CELL: u32 = 0x01;
    pub const MX_STRUCT: u32 = 0x02;
    pub const MX_CHAR: u32 = 0x04;
    pub const MX_DOUBLE: u32 = 0x06;
    pub const MX_SINGLE: u32 = 0x07;
    pub const MX_INT8: u32 = 0x08;
    pub const MX_UINT8: u32 = 0x09;
    pub const MX_INT16: u32 = 0x0A;
    pub const MX_UINT16: u32 = 0x0B;
    pub const MX_INT32: u32 = 0x0C;
    pub const MX_UINT32: u32 = 0x0D;
    pub const MX_INT64: u32 = 0x0E;
    pub const MX_UINT64: u32 = 0x0F;
}

/// Array-flags bit indicating the array is logical; OR-ed onto `MX_UINT8`.
pub const LOGICAL_FLAG: u32 = 0x0002 << 8;

/// Version field written at bytes 124..126 of the file header, little-endian.
pub const FILE_VERSION: u16 = 0x0100;

/// Endian marker written at bytes 126..128 of the file header.
pub const ENDIAN_MARKER: [u8; 2] = *b"IM";
