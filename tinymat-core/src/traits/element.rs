//! The `MatPrimitive` trait: a type-to-layout mapping for numeric arrays
//!
//! `tinymat`'s array writer is generic over `T: MatPrimitive` rather than
//! hand-specialized per numeric type, the same "one generic path,
//! constrained by a small trait" shape this crate's lineage uses for
//! typed element storage.

use crate::format::{type_code, ArrayClass};

/// Maps a concrete Rust numeric type onto the `(array class, element type
/// code, element size)` triple the MAT-v5 body encoder needs.
///
/// `bool` reuses `u8`'s type/class codes: logical
/// arrays are `MX_UINT8`-typed data with the logical flag set in the
/// array-flags word, which this trait exposes via `LOGICAL` so the matrix
/// encoder can set it without special-casing on `TypeId`.
pub trait MatPrimitive: Copy {
    /// The array class this type is written as.
    const CLASS: ArrayClass;
    /// The `mi*` type code for this type's data element.
    const TYPE_CODE: u32;
    /// Size of one element in bytes.
    const SIZE: usize = core::mem::size_of::<Self>();
    /// Whether the array-flags word's logical bit must be set for this type.
    const LOGICAL: bool = false;
}

impl MatPrimitive for f64 {
    const CLASS: ArrayClass = ArrayClass::Double;
    const TYPE_CODE: u32 = type_code::MI_DOUBLE;
}

impl MatPrimitive for f32 {
    const CLASS: ArrayClass = ArrayClass::Single;
    const TYPE_CODE: u32 = type_code::MI_SINGLE;
}

impl MatPrimitive for i64 {
    const CLASS: ArrayClass = ArrayClass::Int64;
    const TYPE_CODE: u32 = type_code::MI_INT64;
}

impl MatPrimitive for u64 {
    const CLASS: ArrayClass = ArrayClass::UInt64;
    const TYPE_CODE: u32 = type_code::MI_UINT64;
}

impl MatPrimitive for i32 {
    const CLASS: ArrayClass = ArrayClass::Int32;
    const TYPE_CODE: u32 = type_code::MI_INT32;
}

impl MatPrimitive for u32 {
    const CLASS: ArrayClass = ArrayClass::UInt32;
    const TYPE_CODE: u32 = type_code::MI_UINT32;
}

impl MatPrimitive for i16 {
    const CLASS: ArrayClass = ArrayClass::Int16;
    const TYPE_CODE: u32 = type_code::MI_INT16;
}

impl MatPrimitive for u16 {
    const CLASS: ArrayClass = ArrayClass::UInt16;
    const TYPE_CODE: u32 = type_code::MI_UINT16;
}

impl MatPrimitive for i8 {
    const CLASS: ArrayClass = ArrayClass::Int8;
    const TYPE_CODE: u32 = type_code::MI_INT8;
}

impl MatPrimitive for u8 {
    const CLASS: ArrayClass = ArrayClass::UInt8;
    const TYPE_CODE: u32 = type_code::MI_UINT8;
}

/// Logical arrays are `uint8`-coded data with the logical array-flags bit
/// set; `bool` borrows `u8`'s class and type code and forces `LOGICAL` on
/// so the matrix encoder sets that bit for any `T = bool` write.
impl MatPrimitive for bool {
    const CLASS: ArrayClass = ArrayClass::UInt8;
    const TYPE_CODE: u32 = type_code::MI_UINT8;
    const SIZE: usize = 1;
    const LOGICAL: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_match_class() {
        assert_eq!(f64::TYPE_CODE, type_code::MI_DOUBLE);
        assert_eq!(f64::CLASS, ArrayClass::Double);
        assert_eq!(f64::SIZE, 8);
        assert!(!f64::LOGICAL);
    }

    #[test]
    fn bool_reuses_uint8_layout_but_is_logical() {
        assert_eq!(bool::TYPE_CODE, u8::TYPE_CODE);
        assert_eq!(bool::CLASS, ArrayClass::UInt8);
        assert_eq!(bool::SIZE, 1);
        assert!(bool::LOGICAL);
        assert!(!u8::LOGICAL);
    }
}
