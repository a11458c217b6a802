//! 2-D Vectors

use crate::math::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2-D vector containing numeric values. In the meridional plane of a lens
/// `x` is the optical axis and `y` the transverse offset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D vector containing `Float` values.
pub type Vector2f = Vector2<Float>;

impl<T: Num> Vector2<T> {
    /// Creates a new 2-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero vector.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns the dot product with another vector.
    ///
    /// * `other` -  The other vector.
    pub fn dot(&self, other: &Self) -> T
    where
        T: Copy,
    {
        self.x * other.x + self.y * other.y
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y))
    }
}

impl<T: Num> Add for Vector2<T> {
    type Output = Self;

    /// Adds the given vector and returns the result.
    ///
    /// * `other` -  The vector to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> AddAssign for Vector2<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` -  The vector to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.x + other.x, self.y + other.y);
    }
}

impl<T: Num> Sub for Vector2<T> {
    type Output = Self;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` -  The vector to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::Output::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Num + Copy> SubAssign for Vector2<T> {
    /// Performs the `-=` operation.
    ///
    /// * `other` -  The vector to subtract.
    fn sub_assign(&mut self, other: Self) {
        *self = Self::new(self.x - other.x, self.y - other.y);
    }
}

impl<T: Num + Copy> Mul<T> for Vector2<T> {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` -  The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::Output::new(f * self.x, f * self.y)
    }
}

impl Mul<Vector2<Float>> for Float {
    type Output = Vector2<Float>;

    /// Scale the vector.
    ///
    /// * `v` -  The vector.
    fn mul(self, v: Vector2<Float>) -> Vector2<Float> {
        Vector2::new(self * v.x, self * v.y)
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector2<T> {
    /// Scale and assign the result to the vector.
    ///
    /// * `f` -  The scaling factor.
    fn mul_assign(&mut self, f: T) {
        *self = Self::new(f * self.x, f * self.y)
    }
}

impl<T: Num + Copy> Div<T> for Vector2<T> {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` -  The scaling factor.
    fn div(self, f: T) -> Self::Output {
        let inv = T::one() / f;
        Self::Output::new(inv * self.x, inv * self.y)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    /// Flip the vector's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::Output::new(-self.x, -self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Intersects two lines given in point/direction form and returns the point
/// on the first line. Returns `None` for parallel lines.
///
/// * `o1` - Point on the first line.
/// * `d1` - Direction of the first line.
/// * `o2` - Point on the second line.
/// * `d2` - Direction of the second line.
pub fn intersect_lines(o1: Vector2f, d1: Vector2f, o2: Vector2f, d2: Vector2f) -> Option<Vector2f> {
    let det = d2.x * d1.y - d2.y * d1.x;
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let delta = o2 - o1;
    let t1 = (delta.y * d2.x - delta.x * d2.y) / det;
    let p = o1 + d1 * t1;
    if p.is_finite() {
        Some(p)
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn zero_vector() {
        assert!(Vector2::new(0, 0) == Vector2::zero());
        assert!(Vector2::new(0.0, 0.0) == Vector2::zero());
    }

    #[test]
    fn normalize_zero_is_not_finite() {
        assert!(!Vector2::<f32>::zero().normalize().is_finite());
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let d = Vector2::new(1.0, 0.5);
        assert!(intersect_lines(Vector2::zero(), d, Vector2::new(0.0, 1.0), d).is_none());
    }

    #[test]
    fn crossing_lines_intersect() {
        let p = intersect_lines(
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, -1.0),
            Vector2::new(0.0, -1.0),
            Vector2::new(1.0, 1.0),
        )
        .unwrap();
        assert!(approx_eq!(f32, p.x, 1.0, epsilon = 0.00001));
        assert!(approx_eq!(f32, p.y, 0.0, epsilon = 0.00001));
    }

    // Define some properties for tests.
    prop_range!(range_f32, f32, -100.0..100.0f32);

    prop_vector2!(vector2_i32, i32, -100..100i32, -100..100i32);
    prop_vector2!(vector2_f32, f32, -100.0..100.0f32, -100.0..100.0f32);

    proptest! {
        #[test]
        fn length_squared_i32(v in vector2_i32()) {
            prop_assert_eq!(v.length_squared(), v.x * v.x + v.y * v.y);
        }

        #[test]
        fn normalize_f32(v in vector2_f32()) {
            // Division is implemented as multiplication by 1 / l.
            let f = 1.0 / (v.x * v.x + v.y * v.y).sqrt();
            prop_assert_eq!(v.normalize(), Vector2::new(v.x * f, v.y * f));
        }

        #[test]
        fn dot_f32(v1 in vector2_f32(), v2 in vector2_f32()) {
            prop_assert_eq!(v1.dot(&v2), v1.x * v2.x + v1.y * v2.y);
        }

        #[test]
        fn add_sub_f32(v1 in vector2_f32(), v2 in vector2_f32()) {
            prop_assert_eq!(v1 + v2, Vector2::new(v1.x + v2.x, v1.y + v2.y));
            prop_assert_eq!(v1 - v2, Vector2::new(v1.x - v2.x, v1.y - v2.y));
        }

        #[test]
        fn mul_f32(v in vector2_f32(), f in range_f32()) {
            let expected = Vector2::new(v.x * f, v.y * f);
            prop_assert_eq!(v * f, expected);
            prop_assert_eq!(f * v, expected);
        }

        #[test]
        fn neg_f32(v in vector2_f32()) {
            prop_assert_eq!(-v, Vector2::new(-v.x, -v.y));
        }
    }
}
