//! Seidel aberrations

use crate::prescription::*;
use dof_core::math::*;

/// The five primary monochromatic aberration coefficients of a lens for one
/// wavelength and object distance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SeidelCoefficients {
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

    /// Paraxial image distance from the last vertex.
    pub s_prime: Float,
}

impl SeidelCoefficients {
    /// Returns true if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        [self.b, self.c, self.d, self.e, self.f, self.s_prime]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Replaces non-finite coefficients with zero and returns true if any
    /// were replaced.
    pub fn sanitize(&mut self) -> bool {
        let mut replaced = false;
        for v in [
            &mut self.b,
            &mut self.c,
            &mut self.d,
            &mut self.e,
            &mut self.f,
            &mut self.s_prime,
        ] {
            if !v.is_finite() {
                *v = 0.0;
                replaced = true;
            }
        }
        replaced
    }
}

/// Returns `r s n2 / (r n1 + s (n2 - n1))`, the paraxial conjugate of `s`
/// through a single refracting surface.
#[inline]
fn conjugate(r: Float, s: Float, n1: Float, n2: Float) -> Float {
    r * s * n2 / (r * n1 + s * (n2 - n1))
}

/// Sums the per surface Seidel contributions. Distances follow the sign
/// convention where points in front of a surface are negative. The object
/// point and the entrance pupil seed the paraxial marginal (`s`) and chief
/// (`t`) ray recurrences. Results are not sanitized.
///
/// * `prescription`   - The lens.
/// * `wavelength`     - Wavelength in micrometers.
/// * `distance`       - Object distance; the object sits at axial position `-distance`.
/// * `entrance_pupil` - Axial position of the entrance pupil.
pub fn seidel_coefficients(
    prescription: &LensPrescription,
    wavelength: Float,
    distance: Float,
    entrance_pupil: Float,
) -> SeidelCoefficients {
    let vertex0 = prescription.front_vertex();
    let mut coefficients = SeidelCoefficients::default();

    let mut s = -(vertex0 + distance);
    let mut t = -(vertex0 - entrance_pupil);
    let mut h = s / (t - s);
    let mut k = t * (t - s) / (prescription.index(0, wavelength) * s);
    let mut s_prime: Float = 0.0;
    let mut t_prime: Float = 0.0;

    for (i, surface) in prescription.surfaces().iter().enumerate() {
        let n_prev = prescription.index(i, wavelength);
        let n = prescription.index(i + 1, wavelength);
        let r = surface.radius;

        if i > 0 {
            let gap = prescription.surface(i - 1).thickness;
            let h_prev = h;
            s = s_prime - gap;
            t = t_prime - gap;
            h = s / s_prime * h_prev;
            k += gap / (n_prev * h_prev * h);
        }
        s_prime = conjugate(r, s, n_prev, n);
        t_prime = conjugate(r, t, n_prev, n);

        let kk = n_prev * (1.0 / r - 1.0 / s);
        let a = 1.0 / (n * s_prime) - 1.0 / (n_prev * s);
        let b_term = 1.0 / (n * n) - 1.0 / (n_prev * n_prev);
        let h2 = h * h;
        let ci = h2 * k * kk;

        coefficients.b += 0.5 * h2 * h2 * kk * kk * a;
        coefficients.c += 0.5 * (1.0 + ci) * (1.0 + ci) * a;
        coefficients.d += 0.5 * (ci * (2.0 + ci) * a - kk * b_term);
        coefficients.e += 0.5 * (k * (1.0 + ci) * (2.0 + ci) * a - (1.0 + ci) / h2 * b_term);
        coefficients.f += 0.5 * h2 * kk * (1.0 + ci) * a;
    }

    coefficients.s_prime = s_prime;
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glass::*;
    use crate::paraxial::*;
    use float_cmp::*;

    fn singlet() -> LensPrescription {
        import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription
    }

    #[test]
    fn equal_media_have_no_aberrations() {
        let p = LensPrescription::new(
            vec![
                LensSurface::new(0.05, 0.0, 0.01, 0.02),
                LensSurface::new(-0.08, 0.01, 0.0, 0.02),
            ],
            vec![Medium::air(), Medium::air(), Medium::air()],
            0,
        )
        .unwrap();

        let seidel = seidel_coefficients(&p, 0.55, 2.0, 0.0);
        for v in [seidel.b, seidel.c, seidel.d, seidel.e, seidel.f] {
            assert!(abs(v) < 1e-4, "{v}");
        }
        // No refraction: the image of the object is the object itself.
        assert!(approx_eq!(f32, seidel.s_prime, -2.01, epsilon = 1e-4));
    }

    #[test]
    fn singlet_has_spherical_aberration() {
        let p = singlet();
        let seidel = seidel_coefficients(&p, 0.55, 2.0, 0.0);
        assert!(seidel.is_finite());
        assert!(seidel.b != 0.0);
        assert!(seidel.f != 0.0);
    }

    #[test]
    fn image_distance_matches_paraxial_image() {
        let p = singlet();
        for distance in [0.5, 2.0, 10.0] {
            let seidel = seidel_coefficients(&p, 0.55, distance, 0.0);
            let image = ParaxialSystem::new(&p, 0.55).image_position(-distance).unwrap();
            assert!(
                approx_eq!(f32, p.rear_vertex() + seidel.s_prime, image, epsilon = 1e-5),
                "{distance}"
            );
        }
    }

    #[test]
    fn sanitize_replaces_non_finite() {
        let mut seidel = SeidelCoefficients {
            b: Float::NAN,
            c: 1.0,
            d: Float::INFINITY,
            ..Default::default()
        };
        assert!(!seidel.is_finite());
        assert!(seidel.sanitize());
        assert_eq!(seidel.b, 0.0);
        assert_eq!(seidel.c, 1.0);
        assert_eq!(seidel.d, 0.0);
        assert!(!seidel.sanitize());
    }
}
