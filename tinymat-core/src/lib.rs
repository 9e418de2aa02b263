#![no_std]

//! TinyMAT Core - MAT-v5 (Level-5) binary format definitions
//!
//! This crate provides the pure format definitions, error taxonomy and
//! generic traits shared by the `tinymat` writer. It performs no I/O: every
//! type here is a byte-layout description or a trait interface, not a
//! concrete encoder.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
#[cfg(feature = "alloc")]
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
#[cfg(feature = "alloc")]
pub use traits::*;
