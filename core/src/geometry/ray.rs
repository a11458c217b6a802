//! Rays

use super::AxialVector;
use crate::math::Float;
use std::fmt;

/// A ray with an origin and a unit direction, in 2-D or 3-D lens space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<V> {
    /// Origin.
    pub o: V,

    /// Direction.
    pub d: V,
}

impl<V: AxialVector> Ray<V> {
    /// Create a new ray.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: V, d: V) -> Self {
        Self { o, d }
    }

    /// Create a new ray through two points.
    ///
    /// * `from` - Origin.
    /// * `to`   - Point the ray passes through.
    pub fn through(from: V, to: V) -> Self {
        Self::new(from, (to - from).unit())
    }

    /// Returns the position along the ray at a given parameter.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> V {
        self.o + self.d * t
    }

    /// Returns the point where the ray's line crosses the plane perpendicular
    /// to the optical axis at the given axial position. Returns `None` when
    /// the ray runs parallel to the plane.
    ///
    /// * `position` - Axial position of the plane.
    pub fn at_axial(&self, position: Float) -> Option<V> {
        let t = (position - self.o.axial()) / self.d.axial();
        let p = self.at(t);
        if t.is_finite() && p.all_finite() {
            Some(p)
        } else {
            None
        }
    }
}

impl<V: fmt::Display> fmt::Display for Ray<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[o={}, d={}]", self.o, self.d)
    }
}
