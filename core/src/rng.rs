//! Random Number Generator.

use crate::math::*;

/// 32-bit precision value for 1 - epsilon.
pub const FLOAT_ONE_MINUS_EPSILON: f32 = hexf32!("0x1.fffffep-1"); // 0.99999994

/// 1 - epsilon in the precision we've selected for `Float`.
pub const ONE_MINUS_EPSILON: Float = FLOAT_ONE_MINUS_EPSILON;

/// Seed used when none is given.
pub const DEFAULT_SEED: u32 = 1341;

/// Xorshift has a fixed point at zero; zero seeds are replaced with this.
const ZERO_SEED_REPLACEMENT: u32 = 0x9e3779b9;

/// Implements a 32-bit xorshift pseudo-random number generator. The state is
/// owned by the caller; parallel workers each own one stream.
#[derive(Clone, Debug, PartialEq)]
pub struct RNG {
    state: u32,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with the default seed.
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RNG {
    /// Create a new `RNG` from a seed.
    ///
    /// * `seed` - The seed.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Create the `RNG` for one logical stream derived from a base seed. Equal
    /// inputs always produce the same stream.
    ///
    /// * `seed`  - The base seed.
    /// * `index` - Stream index (worker, tile or row).
    pub fn stream(seed: u32, index: u64) -> Self {
        // splitmix64 finalizer to decorrelate neighbouring indices.
        let mut z = (((seed as u64) << 32) | (seed as u64)) ^ index.wrapping_mul(0x9e3779b97f4a7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        Self::new((z ^ (z >> 32)) as u32)
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    #[inline(always)]
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32") as Float,
            ONE_MINUS_EPSILON,
        )
    }
}
