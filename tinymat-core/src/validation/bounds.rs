//! Array bounds validation for MAT-v5 array bodies
//!
//! Pure mathematical validation with no I/O, used defensively wherever
//! caller-supplied `dims` must agree with a data slice's length (the
//! row-major-to-column-major transposition in the matrix encoder).

use crate::MatError;

/// Validate that a byte length can represent a whole number of `T` elements,
/// returning the element count. Rejects lengths that could overflow a later
/// `count * size_of::<T>()` recomputation.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, MatError> {
    let element_size = core::mem::size_of::<T>();

    if element_size == 0 {
        return Ok(0);
    }

    if byte_len % element_size != 0 {
        return Err(MatError::InvariantViolation);
    }

    let count = byte_len / element_size;

    if count > usize::MAX / 8 {
        return Err(MatError::InvariantViolation);
    }

    Ok(count)
}

/// Validate that `dims.iter().product() == data_len`. Dimension arithmetic
/// itself is the caller's contract, but this
/// catches the one case the transposition path cannot silently tolerate: a
/// mismatched count would read or write out of bounds during reindexing.
pub fn validate_element_count(dims: &[i32], data_len: usize) -> Result<usize, MatError> {
    let mut product: usize = 1;
    for &d in dims {
        if d < 0 {
            return Err(MatError::InvariantViolation);
        }
        product = product
            .checked_mul(d as usize)
            .ok_or(MatError::InvariantViolation)?;
    }

    if product != data_len {
        return Err(MatError::InvariantViolation);
    }

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_array_bounds() {
        assert_eq!(validate_array_bounds::<u32>(16), Ok(4));
        assert_eq!(validate_array_bounds::<u64>(24), Ok(3));
        assert_eq!(
            validate_array_bounds::<u32>(15),
            Err(MatError::InvariantViolation)
        );
        assert_eq!(validate_array_bounds::<u32>(0), Ok(0));
    }

    #[test]
    fn test_validate_element_count() {
        assert_eq!(validate_element_count(&[2, 3], 6), Ok(6));
        assert_eq!(validate_element_count(&[1], 1), Ok(1));
        assert_eq!(
            validate_element_count(&[2, 3], 5),
            Err(MatError::InvariantViolation)
        );
    }
}
