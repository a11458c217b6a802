//! Pupil solver

use crate::prescription::*;
use crate::tracer::*;
use dof_core::geometry::*;
use dof_core::math::*;

/// Distance in front of the first vertex the marginal ray starts from.
const MARGINAL_RAY_DISTANCE: Float = 1.0;

/// Sub-steps per bracket during the marginal angle search.
const SEARCH_STEPS: usize = 100;

/// Upper bound on the total number of sub-steps.
const MAX_SEARCH_STEPS: usize = 1000;

/// Attempts made to locate a pupil before falling back to the stop vertex.
const PUPIL_ATTEMPTS: i32 = 10;

/// Result of the marginal ray angle search. Every angle up to `angle_min`
/// passes the lens; `angle_max` is the first angle known to fail.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarginalSearch {
    /// Largest angle known to pass.
    pub angle_min: Float,

    /// Smallest angle known to fail (or the bracket end).
    pub angle_max: Float,

    /// False when the search ran out of sub-steps.
    pub converged: bool,
}

/// Pupil positions and radii for one wavelength.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pupils {
    /// Axial position of the entrance pupil.
    pub entrance_pupil: Float,

    /// Axial position of the exit pupil.
    pub exit_pupil: Float,

    /// Radius of the entrance pupil.
    pub entrance_pupil_radius: Float,

    /// Radius of the exit pupil.
    pub exit_pupil_radius: Float,

    /// Angle of the marginal ray launched from 1 m in front of the lens.
    pub marginal_angle: Float,
}

/// Returns the origin of the marginal ray.
fn marginal_origin(prescription: &LensPrescription) -> Vector2f {
    Vector2f::new(prescription.front_vertex() - MARGINAL_RAY_DISTANCE, 0.0)
}

/// Returns the marginal ray for an angle.
fn marginal_ray(prescription: &LensPrescription, angle: Float) -> Ray<Vector2f> {
    Ray::new(marginal_origin(prescription), Vector2f::new(angle.cos(), angle.sin()))
}

/// Finds the steepest angle of a ray from a point on the axis 1 m in front of
/// the lens that still passes every surface. The bracket starts at the angle
/// subtended by the first element and is narrowed to the first failing
/// sub-step until it is below `1e-7` of its initial width.
///
/// * `prescription` - The lens.
/// * `wavelength`   - Wavelength in micrometers.
pub fn find_marginal_angle(prescription: &LensPrescription, wavelength: Float) -> MarginalSearch {
    let tracer = RayTracer::exact(prescription);
    let passes = |angle: Float| {
        let ray = marginal_ray(prescription, angle);
        tracer.trace_all(ray, wavelength, TraceDirection::Forward).is_ok()
    };

    let mut lo: Float = 0.0;
    let mut hi = (prescription.surface(0).aperture / MARGINAL_RAY_DISTANCE).atan();
    let tolerance = 1e-7 * (hi - lo);
    let mut steps = 0;

    loop {
        let step = (hi - lo) / SEARCH_STEPS as Float;
        if hi - lo <= tolerance || lo + step == lo {
            return MarginalSearch {
                angle_min: lo,
                angle_max: hi,
                converged: true,
            };
        }

        let mut failed = false;
        let mut passed = lo;
        for k in 1..=SEARCH_STEPS {
            steps += 1;
            let angle = lo + k as Float * step;
            if !passes(angle) {
                hi = angle;
                lo = passed;
                failed = true;
                break;
            }
            passed = angle;
        }

        if !failed {
            // The whole bracket passes.
            return MarginalSearch {
                angle_min: hi,
                angle_max: hi,
                converged: true,
            };
        }

        if steps > MAX_SEARCH_STEPS {
            warn!(
                "Marginal ray search did not converge at {}um; bracket [{}, {}]",
                wavelength, lo, hi
            );
            return MarginalSearch {
                angle_min: lo,
                angle_max: hi,
                converged: false,
            };
        }
    }
}

/// Returns where a traced ray's line crosses the optical axis.
fn axis_crossing(ray: &Ray<Vector2f>) -> Option<Float> {
    let x = ray.o.x - ray.o.y / ray.d.y * ray.d.x;
    if x.is_finite() {
        Some(x)
    } else {
        None
    }
}

/// Locates the entrance and exit pupils by tracing shallow rays from the
/// stop vertex towards the object and image sides. Pupils that cannot be
/// found fall back to the stop vertex.
///
/// * `prescription` - The lens.
/// * `wavelength`   - Wavelength in micrometers.
pub fn locate_pupils(prescription: &LensPrescription, wavelength: Float) -> (Float, Float) {
    let tracer = RayTracer::exact(prescription);
    let stop = prescription.stop();
    let stop_vertex = prescription.surface(stop).vertex;
    let origin = Vector2f::new(stop_vertex, 0.0);

    let mut entrance = None;
    let mut exit = None;
    for attempt in 0..PUPIL_ATTEMPTS {
        let slope = 0.1 / (2.0 as Float).powi(attempt);

        if entrance.is_none() {
            let ray = Ray::new(origin, Vector2f::new(-1.0, -slope).normalize());
            entrance = tracer
                .trace(ray, wavelength, 0..=stop, TraceDirection::Backward)
                .ok()
                .and_then(|r| axis_crossing(&r));
        }

        if exit.is_none() {
            let ray = Ray::new(origin, Vector2f::new(1.0, slope).normalize());
            exit = tracer
                .trace(ray, wavelength, stop..=prescription.last(), TraceDirection::Forward)
                .ok()
                .and_then(|r| axis_crossing(&r));
        }

        if entrance.is_some() && exit.is_some() {
            break;
        }
    }

    let entrance = entrance.unwrap_or_else(|| {
        warn!("Entrance pupil not found at {}um; using the stop", wavelength);
        stop_vertex
    });
    let exit = exit.unwrap_or_else(|| {
        warn!("Exit pupil not found at {}um; using the stop", wavelength);
        stop_vertex
    });
    (entrance, exit)
}

/// Computes pupil positions and radii for one wavelength.
///
/// * `prescription` - The lens.
/// * `wavelength`   - Wavelength in micrometers.
pub fn solve_pupils(prescription: &LensPrescription, wavelength: Float) -> Pupils {
    let search = find_marginal_angle(prescription, wavelength);
    let (entrance_pupil, exit_pupil) = locate_pupils(prescription, wavelength);

    let marginal = marginal_ray(prescription, search.angle_min);
    let entrance_pupil_radius = marginal.at_axial(entrance_pupil).map_or(0.0, |p| abs(p.y));

    let tracer = RayTracer::exact(prescription);
    let exit_pupil_radius = match tracer.trace_all(marginal, wavelength, TraceDirection::Forward) {
        Ok(ray) => ray.at_axial(exit_pupil).map(|p| abs(p.y)),
        Err(failure) => {
            debug!("Marginal ray failed: {}", failure);
            None
        }
    };
    let exit_pupil_radius = exit_pupil_radius.unwrap_or_else(|| {
        warn!("Exit pupil radius unavailable at {}um; using the entrance pupil", wavelength);
        entrance_pupil_radius
    });

    Pupils {
        entrance_pupil,
        exit_pupil,
        entrance_pupil_radius,
        exit_pupil_radius,
        marginal_angle: search.angle_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glass::*;
    use float_cmp::*;

    fn singlet() -> LensPrescription {
        import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription
    }

    #[test]
    fn marginal_search_converges() {
        let p = singlet();
        let search = find_marginal_angle(&p, 0.55);
        assert!(search.converged);
        assert!(search.angle_max - search.angle_min < 1e-8);

        let tracer = RayTracer::exact(&p);
        let ray = marginal_ray(&p, search.angle_min);
        assert!(tracer.trace_all(ray, 0.55, TraceDirection::Forward).is_ok());
        let ray = marginal_ray(&p, search.angle_min * 1.01);
        assert!(tracer.trace_all(ray, 0.55, TraceDirection::Forward).is_err());
    }

    #[test]
    fn unobstructed_bracket_ends_search() {
        // A concave front element is met below its rim and a wide rear
        // element never clips, so the whole bracket passes.
        let p = LensPrescription::new(
            vec![
                LensSurface::new(-0.05, 0.0, 0.01, 0.01),
                LensSurface::new(-1.0, 0.01, 0.0, 0.5),
            ],
            vec![Medium::air(), Medium::air(), Medium::air()],
            0,
        )
        .unwrap();
        let search = find_marginal_angle(&p, 0.55);
        assert!(search.converged);
        assert_eq!(search.angle_min, search.angle_max);
        assert!(approx_eq!(f32, search.angle_min, (0.01 as Float).atan(), ulps = 2));
    }

    #[test]
    fn stop_at_front_vertex() {
        let p = singlet();
        let pupils = solve_pupils(&p, 0.55);
        assert!(approx_eq!(f32, pupils.entrance_pupil, 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, pupils.entrance_pupil_radius, 0.002, epsilon = 1e-5));

        // Stop imaged through the rear surface lands inside the glass.
        assert!(pupils.exit_pupil > 0.0011 && pupils.exit_pupil < 0.0015, "{}", pupils.exit_pupil);
        assert!(pupils.exit_pupil_radius > 0.0015 && pupils.exit_pupil_radius < 0.0025);
    }

    #[test]
    fn closed_stop_gives_zero_pupil() {
        let mut p = singlet();
        p.set_aperture_scale(0.0).unwrap();
        let pupils = solve_pupils(&p, 0.55);
        assert_eq!(pupils.marginal_angle, 0.0);
        assert_eq!(pupils.entrance_pupil_radius, 0.0);
        assert_eq!(pupils.exit_pupil_radius, 0.0);
    }
}
