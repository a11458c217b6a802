//! Lens data

use crate::pupil::*;
use crate::seidel::*;
use dof_core::math::*;
use std::ops::{Add, AddAssign, Mul};

/// Everything the depth of field sampler needs to know about the lens for a
/// single wavelength and object distance. Arithmetic is field by field so
/// records can be bilinearly interpolated.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LensData {
    /// Spherical aberration.
    pub b: Float,

    /// Astigmatism.
    pub c: Float,

    /// Field curvature.
    pub d: Float,

    /// Distortion.
    pub e: Float,

    /// Coma.
    pub f: Float,

    /// Effective focal length.
    pub focal_length: Float,

    /// Axial position of the entrance pupil.
    pub entrance_pupil: Float,

    /// Axial position of the exit pupil.
    pub exit_pupil: Float,

    /// Radius of the entrance pupil.
    pub entrance_pupil_radius: Float,

    /// Radius of the exit pupil.
    pub exit_pupil_radius: Float,

    /// Axial position of the front principal plane.
    pub principal_plane_front: Float,

    /// Axial position of the rear principal plane.
    pub principal_plane_rear: Float,

    /// Paraxial image distance from the last vertex.
    pub s_prime: Float,
}

impl LensData {
    /// Assemble a record from its parts.
    ///
    /// * `seidel`                - Aberration coefficients.
    /// * `pupils`                - Pupil positions and radii.
    /// * `focal_length`          - Effective focal length.
    /// * `principal_plane_front` - Front principal plane.
    /// * `principal_plane_rear`  - Rear principal plane.
    pub fn new(
        seidel: &SeidelCoefficients,
        pupils: &Pupils,
        focal_length: Float,
        principal_plane_front: Float,
        principal_plane_rear: Float,
    ) -> Self {
        Self {
            b: seidel.b,
            c: seidel.c,
            d: seidel.d,
            e: seidel.e,
            f: seidel.f,
            focal_length,
            entrance_pupil: pupils.entrance_pupil,
            exit_pupil: pupils.exit_pupil,
            entrance_pupil_radius: pupils.entrance_pupil_radius,
            exit_pupil_radius: pupils.exit_pupil_radius,
            principal_plane_front,
            principal_plane_rear,
            s_prime: seidel.s_prime,
        }
    }

    /// Returns the pupil magnification `XPr / EPr`.
    pub fn magnification_ratio(&self) -> Float {
        self.exit_pupil_radius / self.entrance_pupil_radius
    }

    /// Returns the f-number `f / (2 EPr)`.
    pub fn f_number(&self) -> Float {
        self.focal_length / (2.0 * self.entrance_pupil_radius)
    }

    fn fields(&self) -> [Float; 13] {
        [
            self.b,
            self.c,
            self.d,
            self.e,
            self.f,
            self.focal_length,
            self.entrance_pupil,
            self.exit_pupil,
            self.entrance_pupil_radius,
            self.exit_pupil_radius,
            self.principal_plane_front,
            self.principal_plane_rear,
            self.s_prime,
        ]
    }

    fn fields_mut(&mut self) -> [&mut Float; 13] {
        [
            &mut self.b,
            &mut self.c,
            &mut self.d,
            &mut self.e,
            &mut self.f,
            &mut self.focal_length,
            &mut self.entrance_pupil,
            &mut self.exit_pupil,
            &mut self.entrance_pupil_radius,
            &mut self.exit_pupil_radius,
            &mut self.principal_plane_front,
            &mut self.principal_plane_rear,
            &mut self.s_prime,
        ]
    }

    /// Returns true if every field is finite.
    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|v| v.is_finite())
    }

    /// Replaces non-finite fields with zero and returns the number replaced.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for v in self.fields_mut() {
            if !v.is_finite() {
                *v = 0.0;
                replaced += 1;
            }
        }
        replaced
    }
}

impl Add for LensData {
    type Output = LensData;

    fn add(self, other: Self) -> Self::Output {
        let mut out = self;
        out += other;
        out
    }
}

impl AddAssign for LensData {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.fields_mut().into_iter().zip(other.fields()) {
            *a += b;
        }
    }
}

impl Mul<Float> for LensData {
    type Output = LensData;

    fn mul(self, s: Float) -> Self::Output {
        let mut out = self;
        for v in out.fields_mut() {
            *v *= s;
        }
        out
    }
}

impl Mul<LensData> for Float {
    type Output = LensData;

    fn mul(self, ld: LensData) -> Self::Output {
        ld * self
    }
}
