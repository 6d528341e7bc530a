// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! 32-bit FNV-1a hashing over byte ranges.
//!
//! Tables generated ahead of time rely on these exact digests, so the
//! byte order, the operand order of the XOR and the wrapping multiply
//! must not change.

/// FNV-1a offset basis
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a prime
pub const FNV_PRIME: u32 = 16_777_619;

/// Hashes a byte slice to a 32-bit FNV-1a digest.
///
/// An empty slice hashes to [`FNV_OFFSET_BASIS`].
#[must_use]
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (u32::from(byte) ^ hash).wrapping_mul(FNV_PRIME)
    })
}

/// Hashes the range `[offset, offset + count)` of `buffer`.
///
/// Bytes outside of the range never influence the digest.
///
/// # Panics
///
/// Panics if the range is out of bounds of `buffer`.
#[must_use]
#[inline]
pub fn hash_range(buffer: &[u8], offset: usize, count: usize) -> u32 {
    fnv1a_32(crate::table::key_range(buffer, offset, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fnv1a_32_empty() {
        assert_eq!(FNV_OFFSET_BASIS, fnv1a_32(&[]));
        assert_eq!(FNV_OFFSET_BASIS, hash_range(b"abc", 1, 0));
    }

    #[test]
    fn fnv1a_32_known_vectors() {
        // Reference values of 32-bit FNV-1a
        assert_eq!(0xE40C_292C, fnv1a_32(b"a"));
        assert_eq!(0xBF9C_F968, fnv1a_32(b"foobar"));
        assert_eq!(0xE70C_2DE5, fnv1a_32(b"b"));
    }

    #[test]
    fn hash_range_ignores_surrounding_bytes() {
        let a = b"xxnameyy";
        let b = b"\0name\xff\xff\xff";

        assert_eq!(fnv1a_32(b"name"), hash_range(a, 2, 4));
        assert_eq!(fnv1a_32(b"name"), hash_range(b, 1, 4));
    }

    #[test]
    #[should_panic = "out of bounds"]
    fn hash_range_out_of_bounds() {
        let _ = hash_range(b"abc", 2, 2);
    }
}
