//! Bucket indexing: maps a 64-bit hash onto a fixed bucket range.

/// Number of buckets every `ChainedMap` is created with. Never changes.
pub const DEFAULT_CAPACITY: usize = 16;

/// Bucket that holds the absent (null) key.
pub(crate) const NULL_BUCKET: usize = 0;

/// Reduce a hash to a bucket index in `[0, capacity)`.
///
/// The hash is read as a signed hash code and its absolute value is taken
/// before the modulo. `i64::MIN` has no positive counterpart, so the
/// magnitude is computed as `u64` (`unsigned_abs`): it becomes `2^63`
/// rather than wrapping back to a negative value.
#[inline]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket array must not be empty");
    let code = hash as i64;
    (code.unsigned_abs() % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_hash_reduces_modulo_capacity() {
        assert_eq!(bucket_index(0, DEFAULT_CAPACITY), 0);
        assert_eq!(bucket_index(5, DEFAULT_CAPACITY), 5);
        assert_eq!(bucket_index(16, DEFAULT_CAPACITY), 0);
        assert_eq!(bucket_index(37, DEFAULT_CAPACITY), 5);
    }

    /// Negative hash codes use their magnitude, not their two's-complement bits.
    #[test]
    fn negative_hash_uses_absolute_value() {
        assert_eq!(bucket_index((-3i64) as u64, DEFAULT_CAPACITY), 3);
        assert_eq!(bucket_index((-17i64) as u64, DEFAULT_CAPACITY), 1);
        assert_eq!(bucket_index(u64::MAX, DEFAULT_CAPACITY), 1); // -1
    }

    /// `i64::MIN` maps to 2^63, which is a multiple of 16.
    #[test]
    fn min_hash_code_does_not_wrap_negative() {
        assert_eq!(bucket_index(i64::MIN as u64, DEFAULT_CAPACITY), 0);
        assert_eq!(bucket_index(i64::MIN as u64, 3), ((1u64 << 63) % 3) as usize);
    }

    #[test]
    fn index_always_in_range() {
        let mut s = 0x9e3779b97f4a7c15u64;
        for _ in 0..10_000 {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            for cap in [1, 7, DEFAULT_CAPACITY, 1000] {
                assert!(bucket_index(s, cap) < cap);
            }
        }
    }
}
