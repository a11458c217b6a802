//! Sequential ray tracer

use crate::prescription::*;
use dof_core::geometry::*;
use dof_core::math::*;
use std::fmt;
use std::ops::RangeInclusive;

/// Order in which surfaces are visited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceDirection {
    /// Object side to image side.
    Forward,

    /// Image side to object side.
    Backward,
}

/// How surfaces are intersected and refracted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceMode {
    /// Real spheres and full vector Snell refraction.
    Exact,

    /// Surfaces flattened to their vertex plane, refraction with cos = 1.
    Gaussian,
}

/// Why a ray did not make it through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceFailureCause {
    /// The ray missed the surface or became degenerate.
    Miss,

    /// The intersection lies outside the clear aperture.
    Vignetted,

    /// The ray was totally internally reflected.
    TotalInternalReflection,
}

/// A ray that was stopped by a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceFailure<V> {
    /// Index of the surface that stopped the ray.
    pub surface: usize,

    /// The reason.
    pub cause: TraceFailureCause,

    /// Ray state at the failing surface.
    pub ray: Ray<V>,
}

impl<V: fmt::Display> fmt::Display for TraceFailure<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at surface {}: {}", self.cause, self.surface, self.ray)
    }
}

/// Traces rays through a prescription.
#[derive(Copy, Clone)]
pub struct RayTracer<'a> {
    prescription: &'a LensPrescription,
    mode: TraceMode,
}

impl<'a> RayTracer<'a> {
    /// Create a tracer.
    ///
    /// * `prescription` - The lens.
    /// * `mode`         - Exact or Gaussian tracing.
    pub fn new(prescription: &'a LensPrescription, mode: TraceMode) -> Self {
        Self { prescription, mode }
    }

    /// Create an exact tracer.
    ///
    /// * `prescription` - The lens.
    pub fn exact(prescription: &'a LensPrescription) -> Self {
        Self::new(prescription, TraceMode::Exact)
    }

    /// Traces a ray through all surfaces.
    ///
    /// * `ray`        - The ray to trace.
    /// * `wavelength` - Wavelength in micrometers.
    /// * `direction`  - Traversal order.
    pub fn trace_all<V: AxialVector>(
        &self,
        ray: Ray<V>,
        wavelength: Float,
        direction: TraceDirection,
    ) -> Result<Ray<V>, TraceFailure<V>> {
        self.trace(ray, wavelength, 0..=self.prescription.last(), direction)
    }

    /// Traces a ray through an inclusive range of surfaces and returns the
    /// ray leaving the last surface visited. Panics if the range is outside
    /// the prescription.
    ///
    /// * `ray`        - The ray to trace.
    /// * `wavelength` - Wavelength in micrometers.
    /// * `surfaces`   - Inclusive surface range.
    /// * `direction`  - Traversal order.
    pub fn trace<V: AxialVector>(
        &self,
        ray: Ray<V>,
        wavelength: Float,
        surfaces: RangeInclusive<usize>,
        direction: TraceDirection,
    ) -> Result<Ray<V>, TraceFailure<V>> {
        let (first, last) = (*surfaces.start(), *surfaces.end());
        assert!(
            first <= last && last < self.prescription.len(),
            "surface range {first}..={last} out of bounds"
        );

        let mut ray = ray;
        for step in 0..=(last - first) {
            let i = match direction {
                TraceDirection::Forward => first + step,
                TraceDirection::Backward => last - step,
            };
            let surface = self.prescription.surface(i);
            let fail = |cause, ray| TraceFailure {
                surface: i,
                cause,
                ray,
            };

            let t = match intersect(&ray, surface, self.mode) {
                Some(t) => t,
                None => return Err(fail(TraceFailureCause::Miss, ray)),
            };
            ray.o = ray.at(t);
            if !ray.o.all_finite() {
                return Err(fail(TraceFailureCause::Miss, ray));
            }

            if ray.o.transverse_length_squared() > surface.aperture * surface.aperture {
                return Err(fail(TraceFailureCause::Vignetted, ray));
            }

            let (before, after) = match direction {
                TraceDirection::Forward => (i, i + 1),
                TraceDirection::Backward => (i + 1, i),
            };
            let n1 = self.prescription.index(before, wavelength);
            let n2 = self.prescription.index(after, wavelength);
            let normal = surface_normal(ray.o, ray.d, surface.center());
            match refract(ray.d, normal, n1, n2, self.mode) {
                Some(d) if d.all_finite() => ray.d = d,
                Some(_) => return Err(fail(TraceFailureCause::Miss, ray)),
                None => return Err(fail(TraceFailureCause::TotalInternalReflection, ray)),
            }
        }

        Ok(ray)
    }
}

/// Returns the ray parameter where a ray meets a surface.
///
/// Exact mode starting inside the sphere takes the far root; starting outside
/// takes the root on the vertex side of the sphere and misses when the ray
/// passes the sphere. Origins within a small relative tolerance of the sphere
/// take the root nearest zero.
///
/// * `ray`     - The ray.
/// * `surface` - The surface.
/// * `mode`    - Exact or Gaussian.
pub fn intersect<V: AxialVector>(ray: &Ray<V>, surface: &LensSurface, mode: TraceMode) -> Option<Float> {
    if mode == TraceMode::Gaussian {
        let t = (surface.vertex - ray.o.axial()) / ray.d.axial();
        return if t.is_finite() { Some(t) } else { None };
    }

    let c = V::on_axis(surface.center()) - ray.o;
    let c2 = c.norm_squared();
    let r2 = surface.radius * surface.radius;
    let tolerance = 1e-6 * r2;

    let t = if abs(c2 - r2) <= tolerance {
        let a = ray.d.norm_squared();
        let (t0, t1) = solve_quadratic(a, -2.0 * ray.d.dot_with(&c), c2 - r2)?;
        if abs(t0) <= abs(t1) {
            t0
        } else {
            t1
        }
    } else if c2 < r2 {
        let a = ray.d.norm_squared();
        let b = -2.0 * ray.d.dot_with(&c);
        let (_, t1) = solve_quadratic(a, b, c2 - r2)?;
        t1
    } else {
        let tc = c.dot_with(&ray.d);
        let q = c - ray.d * tc;
        let p2 = q.norm_squared();
        if p2 > r2 {
            return None;
        }
        let half_chord = (r2 - p2).sqrt();
        let near = tc - half_chord;
        // The near root of a surface curving away from the ray lies on the
        // back of the sphere; the vertex cap is the far root.
        if (ray.at(near).axial() - surface.center()) * surface.radius > 0.0 {
            tc + half_chord
        } else {
            near
        }
    };

    if t.is_finite() {
        Some(t)
    } else {
        None
    }
}

/// Returns the roots of `a t^2 + b t + c` in ascending order.
fn solve_quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 || a == 0.0 {
        return None;
    }
    let root = discrim.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}

/// Returns the unit surface normal at a point, oriented against the
/// incoming direction.
///
/// * `p`      - Point on the surface.
/// * `d`      - Incoming direction.
/// * `center` - Axial position of the center of curvature.
pub fn surface_normal<V: AxialVector>(p: V, d: V, center: Float) -> V {
    let n = (p - V::on_axis(center)).unit();
    if n.dot_with(&d) > 0.0 {
        -n
    } else {
        n
    }
}

/// Refracts a direction at an interface with vector Snell's law. Returns
/// `None` on total internal reflection.
///
/// * `d`      - Incoming unit direction.
/// * `normal` - Unit normal facing against `d`.
/// * `n1`     - Index before the interface.
/// * `n2`     - Index after the interface.
/// * `mode`   - Gaussian mode uses cos = 1.
pub fn refract<V: AxialVector>(d: V, normal: V, n1: Float, n2: Float, mode: TraceMode) -> Option<V> {
    let eta = n1 / n2;
    let cos_theta = match mode {
        TraceMode::Exact => -normal.dot_with(&d),
        TraceMode::Gaussian => 1.0,
    };

    let k = 1.0 - eta * eta * (1.0 - cos_theta * cos_theta);
    if k < 0.0 {
        return None;
    }
    Some(d * eta + normal * (eta * cos_theta - k.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glass::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn singlet() -> LensPrescription {
        import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription
    }

    fn air_pair() -> LensPrescription {
        LensPrescription::new(
            vec![
                LensSurface::new(0.05, 0.0, 0.01, 0.02),
                LensSurface::new(-0.05, 0.01, 0.0, 0.02),
            ],
            vec![Medium::air(), Medium::air(), Medium::air()],
            0,
        )
        .unwrap()
    }

    #[test]
    fn on_axis_ray_stays_on_axis() {
        let p = singlet();
        let tracer = RayTracer::exact(&p);
        let ray = Ray::new(Vector2f::new(-1.0, 0.0), Vector2f::new(1.0, 0.0));
        let out = tracer.trace_all(ray, 0.55, TraceDirection::Forward).unwrap();
        assert_eq!(out.o.y, 0.0);
        assert_eq!(out.d.y, 0.0);
        assert!(approx_eq!(f32, out.o.x, 0.004, epsilon = 1e-6));

        let ray = Ray::new(Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 0.0, 1.0));
        let out = tracer.trace_all(ray, 0.45, TraceDirection::Forward).unwrap();
        assert_eq!((out.o.x, out.o.y), (0.0, 0.0));
        assert_eq!((out.d.x, out.d.y), (0.0, 0.0));
    }

    #[test]
    fn parallel_ray_converges() {
        let p = singlet();
        let tracer = RayTracer::exact(&p);
        let ray = Ray::new(Vector2f::new(-1.0, 0.001), Vector2f::new(1.0, 0.0));
        let out = tracer.trace_all(ray, 0.55, TraceDirection::Forward).unwrap();
        assert!(out.d.y < 0.0);
        // Back focal distance of the singlet is close to 49 mm.
        let focus = out.o.x - out.o.y / out.d.y * out.d.x;
        assert!(focus > 0.004 + 0.045 && focus < 0.004 + 0.055, "focus {focus}");
    }

    #[test]
    fn vignetting_reports_surface() {
        let p = singlet();
        let tracer = RayTracer::exact(&p);
        let ray = Ray::new(Vector2f::new(-1.0, 0.005), Vector2f::new(1.0, 0.0));
        let err = tracer.trace_all(ray, 0.55, TraceDirection::Forward).unwrap_err();
        assert_eq!(err.surface, 0);
        assert_eq!(err.cause, TraceFailureCause::Vignetted);
        assert!(approx_eq!(f32, err.ray.o.y, 0.005, epsilon = 1e-7));
    }

    #[test]
    fn miss_is_reported() {
        let p = air_pair();
        let tracer = RayTracer::exact(&p);
        // Travels parallel to the axis above the sphere.
        let ray = Ray::new(Vector2f::new(-1.0, 0.2), Vector2f::new(1.0, 0.0));
        let err = tracer.trace_all(ray, 0.55, TraceDirection::Forward).unwrap_err();
        assert_eq!(err.cause, TraceFailureCause::Miss);
        assert_eq!(err.surface, 0);
    }

    #[test]
    fn total_internal_reflection() {
        let d = Vector2f::new(1.0, 1.0).normalize();
        let n = Vector2f::new(-1.0, 0.0);
        assert!(refract(d, n, 2.0, 1.0, TraceMode::Exact).is_none());
        assert!(refract(d, n, 1.0, 2.0, TraceMode::Exact).is_some());
    }

    #[test]
    fn starting_on_a_vertex_hits_at_zero() {
        let p = singlet();
        let ray = Ray::new(Vector2f::new(0.0, 0.0), Vector2f::new(-1.0, -0.1).normalize());
        assert_eq!(intersect(&ray, p.surface(0), TraceMode::Exact), Some(0.0));
        let ray = Ray::new(Vector2f::new(0.0, 0.0), Vector2f::new(1.0, 0.1).normalize());
        assert_eq!(intersect(&ray, p.surface(0), TraceMode::Exact), Some(0.0));
    }

    #[test]
    fn concave_surface_hit_on_vertex_cap() {
        let surface = LensSurface::new(-0.05, 0.0, 0.0, 0.02);
        let ray = Ray::new(Vector2f::new(-1.0, 0.001), Vector2f::new(1.0, 0.0));
        let t = intersect(&ray, &surface, TraceMode::Exact).unwrap();
        assert!(approx_eq!(f32, ray.at(t).x, 0.0, epsilon = 1e-4));

        let ray = Ray::new(Vector2f::new(1.0, 0.001), Vector2f::new(-1.0, 0.0));
        let t = intersect(&ray, &LensSurface::new(0.05, 0.0, 0.0, 0.02), TraceMode::Exact).unwrap();
        assert!(approx_eq!(f32, ray.at(t).x, 0.0, epsilon = 1e-4));
    }

    #[test]
    fn backward_trace_reverses_forward() {
        let p = singlet();
        let tracer = RayTracer::exact(&p);
        let ray = Ray::through(Vector2f::new(-1.0, 0.0), Vector2f::new(0.0, 0.001));
        let out = tracer.trace_all(ray, 0.55, TraceDirection::Forward).unwrap();
        let back = Ray::new(out.o + out.d * 0.05, -out.d);
        let returned = tracer.trace_all(back, 0.55, TraceDirection::Backward).unwrap();
        // Back at the object plane.
        let p0 = returned.at_axial(-1.0).unwrap();
        assert!(approx_eq!(f32, p0.y, 0.0, epsilon = 1e-5), "{}", p0.y);
    }

    #[test]
    fn gaussian_mode_uses_vertex_planes() {
        let p = singlet();
        let tracer = RayTracer::new(&p, TraceMode::Gaussian);
        let ray = Ray::through(Vector2f::new(-1.0, 0.0), Vector2f::new(0.0, 0.001));
        let out = tracer.trace(ray, 0.55, 0..=0, TraceDirection::Forward).unwrap();
        assert!(approx_eq!(f32, out.o.x, 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, out.o.y, 0.001, epsilon = 1e-6));
    }

    prop_compose! {
        fn arb_direction()(x in 0.2..1.0f32, y in -0.5..0.5f32) -> Vector2f {
            Vector2f::new(x, y)
        }
    }

    proptest! {
        #[test]
        fn equal_media_leave_direction_unchanged(d in arb_direction(), y in -0.01..0.01f32) {
            let p = air_pair();
            let tracer = RayTracer::exact(&p);
            let d = d.normalize();
            let ray = Ray::new(Vector2f::new(-0.001, y), d);
            if let Ok(out) = tracer.trace_all(ray, 0.55, TraceDirection::Forward) {
                prop_assert!(approx_eq!(f32, out.d.x, d.x, epsilon = 1e-5));
                prop_assert!(approx_eq!(f32, out.d.y, d.y, epsilon = 1e-5));
            }
        }

        #[test]
        fn refraction_preserves_length(
            d in arb_direction(),
            n1 in 1.0..1.9f32,
            n2 in 1.0..1.9f32,
        ) {
            let d = d.normalize();
            let normal = Vector2f::new(-1.0, 0.0);
            if let Some(out) = refract(d, normal, n1, n2, TraceMode::Exact) {
                prop_assert!(approx_eq!(f32, out.length(), 1.0, epsilon = 1e-4));
            }
        }
    }
}
