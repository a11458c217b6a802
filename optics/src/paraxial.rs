//! Paraxial (ABCD) optics

use crate::prescription::*;
use dof_core::geometry::*;
use dof_core::math::*;

/// First order model of a prescription at one wavelength. The system matrix
/// maps (height, reduced angle) at the front vertex to the rear vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParaxialSystem {
    /// System matrix.
    pub matrix: Matrix2x2,

    /// Axial position of the first vertex.
    pub front_vertex: Float,

    /// Axial position of the last vertex.
    pub rear_vertex: Float,
}

impl ParaxialSystem {
    /// Multiplies refraction and transfer matrices for every surface.
    ///
    /// * `prescription` - The lens.
    /// * `wavelength`   - Wavelength in micrometers.
    pub fn new(prescription: &LensPrescription, wavelength: Float) -> Self {
        let surfaces = prescription.surfaces();
        let mut matrix = Matrix2x2::default();

        for (i, surface) in surfaces.iter().enumerate() {
            let n1 = prescription.index(i, wavelength);
            let n2 = prescription.index(i + 1, wavelength);
            matrix = Matrix2x2::refraction((n2 - n1) / surface.radius) * matrix;

            if let Some(next) = surfaces.get(i + 1) {
                matrix = Matrix2x2::transfer(next.vertex - surface.vertex, n2) * matrix;
            }
        }

        Self {
            matrix,
            front_vertex: prescription.front_vertex(),
            rear_vertex: prescription.rear_vertex(),
        }
    }

    /// Returns the power term of the system matrix.
    #[inline]
    fn c(&self) -> Float {
        self.matrix.m[1][0]
    }

    /// Returns the effective focal length.
    pub fn focal_length(&self) -> Float {
        -1.0 / self.c()
    }

    /// Returns the axial position of the front principal plane.
    pub fn principal_plane_front(&self) -> Float {
        self.front_vertex + (self.matrix.m[1][1] - 1.0) / self.c()
    }

    /// Returns the axial position of the rear principal plane.
    pub fn principal_plane_rear(&self) -> Float {
        self.rear_vertex + (1.0 - self.matrix.m[0][0]) / self.c()
    }

    /// Returns the axial position of the rear focal point.
    pub fn back_focal_point(&self) -> Float {
        self.rear_vertex - self.matrix.m[0][0] / self.c()
    }

    /// Returns the axial position of the paraxial image of an on-axis point
    /// using the thick lens equation. Objects in the front focal plane have no
    /// image.
    ///
    /// * `object` - Axial position of the object point.
    pub fn image_position(&self, object: Float) -> Option<Float> {
        let f = self.focal_length();
        let so = self.principal_plane_front() - object;
        let si = f * so / (so - f);
        let image = self.principal_plane_rear() + si;
        if image.is_finite() {
            Some(image)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glass::*;
    use float_cmp::*;

    #[test]
    fn single_surface_focal_length() {
        let n: Float = 1.5;
        let r: Float = 0.1;
        let glass = Medium::new("N15", [n * n, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let p = LensPrescription::new(
            vec![LensSurface::new(r, 0.0, 0.0, 0.02)],
            vec![Medium::air(), glass],
            0,
        )
        .unwrap();

        let system = ParaxialSystem::new(&p, 0.55);
        assert!(approx_eq!(f32, system.focal_length(), r / (n - 1.0), epsilon = 1e-5));
        assert!(approx_eq!(f32, system.principal_plane_front(), 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, system.principal_plane_rear(), 0.0, epsilon = 1e-6));
    }

    #[test]
    fn thin_singlet_obeys_lensmaker() {
        let p = import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription;
        let system = ParaxialSystem::new(&p, 0.5875618);
        assert!(approx_eq!(f32, system.matrix.determinant(), 1.0, epsilon = 1e-4));

        // Thick lens: 1/f = (n-1)(2/R) - (n-1)^2 d / (n R^2).
        let n: Float = 1.5168;
        let r = p.surface(0).radius;
        let d = p.surface(0).thickness;
        let expected = 1.0 / ((n - 1.0) * 2.0 / r - (n - 1.0) * (n - 1.0) * d / (n * r * r));
        assert!(approx_eq!(f32, system.focal_length(), expected, epsilon = 1e-4));

        // Symmetric lens: principal planes straddle the center.
        let center = 0.5 * (system.front_vertex + system.rear_vertex);
        assert!(system.principal_plane_front() > system.front_vertex);
        assert!(system.principal_plane_rear() < system.rear_vertex);
        assert!(approx_eq!(
            f32,
            system.principal_plane_front() - center,
            center - system.principal_plane_rear(),
            epsilon = 1e-5
        ));
    }

    #[test]
    fn image_of_object_at_two_focal_lengths() {
        let p = import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription;
        let system = ParaxialSystem::new(&p, 0.55);
        let f = system.focal_length();
        let object = system.principal_plane_front() - 2.0 * f;
        let image = system.image_position(object).unwrap();
        assert!(approx_eq!(f32, image, system.principal_plane_rear() + 2.0 * f, epsilon = 1e-4));

        let infinity = system.image_position(-1.0e6).unwrap();
        assert!(approx_eq!(f32, infinity, system.back_focal_point(), epsilon = 1e-5));
    }
}
