//! Binary layout definitions for the MAT-v5 (Level-5) wire format
//!
//! This module contains pure data-structure definitions for the MAT-v5
//! format: tag/element constants, the file header, and the array-class
//! enumeration. No I/O, no concrete encoder — those live in `tinymat`.

pub mod constants;
pub mod element;
pub mod header;

pub use constants::{
    class_code, type_code, ALIGNMENT_BOUNDARY, LOGICAL_FLAG, MAX_FIELD_NAME_LEN,
    MIN_FIELD_NAME_WIDTH,
};
pub use element::{ArrayClass, ElementTag};
pub use header::FileHeader;
