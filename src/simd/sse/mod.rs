//! 128-bit x86 kernels (SSE through SSE4.1, plus the 128-bit FMA forms).
//!
//! Every function here carries `#[target_feature]` for the tier it is listed
//! under in [`Operation::candidates`](crate::simd::Operation::candidates), so
//! it may only be called through a dispatcher holding that capability.
//! [`F64x4`](crate::simd::F64x4) is processed as two `__m128d` halves.

pub(crate) mod f32x4;
pub(crate) mod f64x4;

/// Shuffle immediate naming the source lane of output lanes 3, 2, 1, 0.
pub(crate) const fn shuffle(z: i32, y: i32, x: i32, w: i32) -> i32 {
    (z << 6) | (y << 4) | (x << 2) | w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_packs_two_bits_per_lane() {
        assert_eq!(shuffle(3, 2, 1, 0), 0b11_10_01_00);
        assert_eq!(shuffle(3, 0, 2, 1), 0b11_00_10_01);
        assert_eq!(shuffle(3, 1, 0, 2), 0b11_01_00_10);
        assert_eq!(shuffle(2, 3, 0, 1), 0b10_11_00_01);
    }
}
