//! Abstract interfaces for the MAT-v5 writer
//!
//! Pure trait definitions — no concrete implementations. `tinymat` supplies
//! the `ByteSink` backends (direct-to-file, buffered) and uses `MatPrimitive`
//! to parameterize its single generic array writer over every numeric type.

pub mod backend;
pub mod element;

pub use backend::ByteSink;
pub use element::MatPrimitive;
