//! tinymat - a MAT-v5 (Level-5, MATLAB "v6") binary file writer
//!
//! Writes a stream of named top-level variables — numeric N-dimensional
//! arrays, character arrays, logical arrays, structures, and cell arrays,
//! and nested compositions of these — to a file MATLAB, Octave, or any
//! other MAT-v6 reader can open. This crate does not read MAT files.

pub mod container;
pub mod element;
pub mod file;
pub mod matrix;
pub mod primitive;
pub mod sink;
pub mod timestamp;

#[cfg(feature = "serde")]
pub mod summary;

pub use file::MatFile;
pub use primitive::WriteLe;
pub use sink::{BufferedSink, DirectFileSink};
pub use tinymat_core::{ArrayClass, MatError, MatPrimitive};

#[cfg(feature = "serde")]
pub use summary::{MatFileSummary, VariableSummary};
