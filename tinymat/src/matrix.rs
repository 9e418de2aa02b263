//! Matrix Encoder: `miMATRIX` envelopes for every supported array class.
//!
//! All numeric matrices land on disk in column-major order regardless of
//! the caller's input layout. The struct/cell body protocols are
//! implemented in [`crate::container`]; this module owns the common
//! envelope shell and the per-class bodies.

use tinymat_core::{
    format::type_code,
    validation::validate_element_count,
    ArrayClass, ByteSink, MatError, LOGICAL_FLAG,
};

use crate::container::{patch_envelope_size, ContainerStack};
use crate::element::{write_numeric_element, write_u16_string, write_i8_string};
use crate::primitive::{write_u32, WriteLe};

/// Emits the envelope shell common to every array class (tag, size
/// placeholder, array-flags word, dims, name) and returns the offset of
/// the size field to patch on close.
///
/// `name` is recorded against any open struct frame *before* the
/// envelope itself is written, regardless of what ends up on disk.
/// The on-disk Array Name element is only the real `name` for a top-level
/// write (no open frame); nested inside a struct or cell, the name lives
/// in the struct's field-name table (or nowhere, for a cell), so the
/// envelope's own Name element is written empty.
fn begin_envelope<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    class: ArrayClass,
    logical: bool,
    dims: &[i32],
) -> Result<u64, MatError> {
    let nested = !stack.is_empty();
    stack.record_child_name(name);

    write_u32(sink, type_code::MI_MATRIX)?;
    let size_offset = sink.tell();
    write_u32(sink, 0)?; // placeholder, patched on close

    let flags_word = class.code() | if logical { LOGICAL_FLAG } else { 0 };
    write_numeric_element(sink, &[flags_word, 0u32])?;
    write_numeric_element(sink, dims)?;
    write_i8_string(sink, if nested { &[] } else { name })?;

    Ok(size_offset)
}

/// Writes an N-dimensional numeric array whose `data` is already in
/// column-major order.
pub fn write_nd_colmajor<S: ByteSink, T: WriteLe>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    data: &[T],
    dims: &[i32],
) -> Result<(), MatError> {
    if data.is_empty() || dims.is_empty() {
        return write_empty_matrix(sink, stack, name);
    }
    validate_element_count(dims, data.len())?;

    let size_offset = begin_envelope(sink, stack, name, T::CLASS, T::LOGICAL, dims)?;
    write_numeric_element(sink, data)?;
    patch_envelope_size(sink, size_offset)
}

/// Writes an N-dimensional numeric array whose `data` is in row-major
/// order, transposing it into the on-disk column-major layout first.
pub fn write_nd_rowmajor<S: ByteSink, T: WriteLe>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    data: &[T],
    dims: &[i32],
) -> Result<(), MatError> {
    if data.is_empty() || dims.is_empty() {
        return write_empty_matrix(sink, stack, name);
    }
    validate_element_count(dims, data.len())?;

    if dims.len() < 2 {
        return write_nd_colmajor(sink, stack, name, data, dims);
    }

    let (transposed, out_dims) = transpose_first_two_axes(data, dims);
    let size_offset = begin_envelope(sink, stack, name, T::CLASS, T::LOGICAL, &out_dims)?;
    write_numeric_element(sink, &transposed)?;
    patch_envelope_size(sink, size_offset)
}

/// Writes the canonical empty matrix: a `mxDOUBLE` envelope with
/// dimensions `[0, 0]` and an empty name/data body.
pub fn write_empty_matrix<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
) -> Result<(), MatError> {
    let size_offset = begin_envelope(sink, stack, name, ArrayClass::Double, false, &[0, 0])?;
    write_numeric_element::<_, f64>(sink, &[])?;
    patch_envelope_size(sink, size_offset)
}

/// Writes a logical (bool) array: `uint8` body of 0/1 bytes with the
/// logical array-flags bit set.
pub fn write_logical<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    data: &[bool],
    dims: &[i32],
) -> Result<(), MatError> {
    if data.is_empty() || dims.is_empty() {
        return write_empty_matrix(sink, stack, name);
    }
    validate_element_count(dims, data.len())?;

    let size_offset = begin_envelope(sink, stack, name, ArrayClass::UInt8, true, dims)?;
    write_numeric_element(sink, data)?;
    patch_envelope_size(sink, size_offset)
}

/// Writes a character array (MATLAB string) as a `mxCHAR` envelope with
/// dimensions `[1, len]`, body widened to `miUINT16` Latin-1 code units.
pub fn write_char_array<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    latin1: &[u8],
) -> Result<(), MatError> {
    let dims = [1, latin1.len() as i32];
    let size_offset = begin_envelope(sink, stack, name, ArrayClass::Char, false, &dims)?;
    write_u16_string(sink, latin1)?;
    patch_envelope_size(sink, size_offset)
}

/// Opens a struct envelope: writes the common header with `dims = [1, 1]`
/// and pushes a struct frame. Children are appended afterward; the
/// field-name table is spliced in on [`ContainerStack::end_struct`].
pub fn start_struct<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
) -> Result<(), MatError> {
    let size_offset = begin_envelope(sink, stack, name, ArrayClass::Struct, false, &[1, 1])?;
    let data_start = sink.tell();
    stack.push_struct(size_offset, data_start);
    Ok(())
}

/// Opens a cell envelope with the given dimensions and pushes a cell
/// frame. Children are appended as ordinary matrix envelopes afterward.
pub fn start_cell<S: ByteSink>(
    sink: &mut S,
    stack: &mut ContainerStack,
    name: &[u8],
    dims: &[i32],
) -> Result<(), MatError> {
    let size_offset = begin_envelope(sink, stack, name, ArrayClass::Cell, false, dims)?;
    let data_start = sink.tell();
    stack.push_cell(size_offset, data_start);
    Ok(())
}

/// Swaps the first two axes of `dims` and reindexes `data` from row-major
/// (last axis fastest) into the resulting column-major (first axis
/// fastest) layout.
pub(crate) fn transpose_first_two_axes<T: Copy>(data: &[T], dims: &[i32]) -> (Vec<T>, Vec<i32>) {
    let orig: Vec<usize> = dims.iter().map(|&d| d as usize).collect();
    let mut swapped = orig.clone();
    swapped.swap(0, 1);

    let total: usize = swapped.iter().product();
    let mut out = Vec::with_capacity(total);

    for linear in 0..total {
        let mut multi = colmajor_multi_index(linear, &swapped);
        multi.swap(0, 1);
        let src = rowmajor_linear_index(&multi, &orig);
        out.push(data[src]);
    }

    (out, swapped.into_iter().map(|d| d as i32).collect())
}

/// Decomposes a linear index into a multi-index where the first axis
/// varies fastest (column-major).
fn colmajor_multi_index(mut linear: usize, dims: &[usize]) -> Vec<usize> {
    let mut multi = vec![0usize; dims.len()];
    for (axis, &extent) in dims.iter().enumerate() {
        if extent == 0 {
            multi[axis] = 0;
            continue;
        }
        multi[axis] = linear % extent;
        linear /= extent;
    }
    multi
}

/// Composes a multi-index where the last axis varies fastest (row-major)
/// into a linear index.
fn rowmajor_linear_index(multi: &[usize], dims: &[usize]) -> usize {
    let mut linear = 0usize;
    for (axis, &index) in multi.iter().enumerate() {
        linear = linear * dims[axis] + index;
    }
    linear
}
