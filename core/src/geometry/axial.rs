//! Vectors in lens space

use super::{Vector2f, Vector3f};
use crate::math::Float;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A vector in a rotationally symmetric optical system. The optical axis is
/// one coordinate; the remaining coordinates are transverse to it. This lets
/// the same tracing code run in the meridional plane and in 3-D.
pub trait AxialVector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Float, Output = Self>
    + Neg<Output = Self>
{
    /// Returns the point on the optical axis at the given axial position.
    ///
    /// * `position` - Axial position.
    fn on_axis(position: Float) -> Self;

    /// Returns the coordinate along the optical axis.
    fn axial(&self) -> Float;

    /// Returns the squared distance from the optical axis.
    fn transverse_length_squared(&self) -> Float;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot_with(&self, other: &Self) -> Float;

    /// Returns true if all coordinates are finite.
    fn all_finite(&self) -> bool;

    /// Returns the square of the vector's length.
    fn norm_squared(&self) -> Float {
        self.dot_with(self)
    }

    /// Returns the unit vector.
    fn unit(&self) -> Self {
        *self * (1.0 / self.norm_squared().sqrt())
    }
}

impl AxialVector for Vector2f {
    fn on_axis(position: Float) -> Self {
        Vector2f::new(position, 0.0)
    }

    fn axial(&self) -> Float {
        self.x
    }

    fn transverse_length_squared(&self) -> Float {
        self.y * self.y
    }

    fn dot_with(&self, other: &Self) -> Float {
        self.dot(other)
    }

    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl AxialVector for Vector3f {
    fn on_axis(position: Float) -> Self {
        Vector3f::new(0.0, 0.0, position)
    }

    fn axial(&self) -> Float {
        self.z
    }

    fn transverse_length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y
    }

    fn dot_with(&self, other: &Self) -> Float {
        self.dot(other)
    }

    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_conventions() {
        assert_eq!(Vector2f::on_axis(2.0), Vector2f::new(2.0, 0.0));
        assert_eq!(Vector3f::on_axis(2.0), Vector3f::new(0.0, 0.0, 2.0));
        assert_eq!(Vector2f::new(1.0, 3.0).transverse_length_squared(), 9.0);
        assert_eq!(Vector3f::new(1.0, 2.0, 3.0).transverse_length_squared(), 5.0);
        assert_eq!(Vector3f::new(1.0, 2.0, 3.0).axial(), 3.0);
    }

    #[test]
    fn unit_matches_normalize() {
        let v = Vector3f::new(3.0, 0.0, 4.0);
        assert_eq!(v.unit(), Vector3f::new(0.6, 0.0, 0.8));
    }
}
