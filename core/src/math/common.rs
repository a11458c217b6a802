//! Common

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Returns gamma corrected values for use in 8-bit images.
///
/// * `value` - Value to correct.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Bilinear interpolation of four corner values. `c10` lies one step along
/// the first axis from `c00`, `c01` one step along the second axis.
///
/// * `tx`  - Parameter along the first axis.
/// * `ty`  - Parameter along the second axis.
/// * `c00` - Value at (0, 0).
/// * `c10` - Value at (1, 0).
/// * `c01` - Value at (0, 1).
/// * `c11` - Value at (1, 1).
#[inline]
pub fn bilerp<P>(tx: Float, ty: Float, c00: P, c10: P, c01: P, c11: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    let [w00, w10, w01, w11] = bilerp_weights(tx, ty);
    w00 * c00 + w10 * c10 + w01 * c01 + w11 * c11
}

/// Returns the bilinear weights of the corners (0, 0), (1, 0), (0, 1) and
/// (1, 1) in that order.
///
/// * `tx` - Parameter along the first axis.
/// * `ty` - Parameter along the second axis.
#[inline]
pub fn bilerp_weights(tx: Float, ty: Float) -> [Float; 4] {
    let (sx, sy) = (1.0 - tx, 1.0 - ty);
    [sx * sy, tx * sy, sx * ty, tx * ty]
}

/// Binary search over `[0, size)` for the last index where `pred` holds,
/// clamped to `[0, size - 2]` so the result always starts a valid interval.
///
/// * `size` - Number of entries; at least 2.
/// * `pred` - Predicate that is true for a prefix of the indices.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    first.saturating_sub(1).min(size.saturating_sub(2))
}

/// Convert a 32-bit floating point value to its constituent bits and
/// return the representation as 32-bit unsigned integer.
///
/// * `f` - The 32-bit floating point number.
#[inline(always)]
pub fn float_to_bits(f: f32) -> u32 {
    f.to_bits()
}

/// Convert the bits of a 32-bit unsigned interger value and return the
/// representation as a 32-bit floating point value.
///
/// * `i` - The 32-bit unsigned interger.
#[inline(always)]
pub fn bits_to_float(i: u32) -> f32 {
    f32::from_bits(i)
}
