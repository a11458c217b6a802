//! Sensor position estimators

use dof_core::geometry::*;
use dof_core::math::*;
use optics::*;

/// Objects closer than this are traced from their actual position.
const SSRT_NEAR_OBJECT: Float = 0.1;

/// Distance in front of the lens far objects are moved to before tracing.
const SSRT_START_DISTANCE: Float = 0.05;

/// Everything an estimator needs to know about one sample.
#[derive(Copy, Clone, Debug)]
pub struct EstimatorInput<'a> {
    /// Lens data for the sample's wavelength and distance.
    pub lens_data: &'a LensData,

    /// Wavelength in micrometers.
    pub wavelength: Float,

    /// Transverse position of the light source.
    pub object: Vector2f,

    /// Axial distance of the light source plane in front of the lens.
    pub distance: Float,

    /// Point on the entrance pupil.
    pub entrance_point: Vector2f,

    /// Point on the exit pupil.
    pub exit_point: Vector2f,

    /// Pupil angle in radians, measured from the y-axis.
    pub theta: Float,

    /// Unit pupil radius.
    pub rho: Float,
}

/// Computes where on the sensor the light of a sample lands. `None` means
/// the sample is invalid and must be discarded.
pub trait SensorEstimator: Send + Sync {
    /// Returns the sensor position in meters.
    ///
    /// * `system` - The lens system.
    /// * `input`  - The sample.
    fn sensor_position(&self, system: &LensSystem, input: &EstimatorInput) -> Option<Vector2f>;
}

/// The available estimators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EstimatorKind {
    /// Analytic estimate from Seidel aberration coefficients.
    Seidel,

    /// Explicit 3-D rays traced through the lens.
    RayTraced,
}

impl EstimatorKind {
    /// Create the estimator.
    ///
    /// * `aberrations` - Apply aberrations (Seidel only).
    pub fn create(self, aberrations: bool) -> Box<dyn SensorEstimator> {
        match self {
            EstimatorKind::Seidel => Box::new(SeidelEstimator::new(aberrations)),
            EstimatorKind::RayTraced => Box::new(RayTracedEstimator),
        }
    }
}

/// Maps the object point through the paraxial imaging of the lens, displaces
/// it by the primary aberrations and follows the ray from the aberrated
/// wavefront to the sensor plane.
#[derive(Copy, Clone, Debug)]
pub struct SeidelEstimator {
    aberrations: bool,
}

impl SeidelEstimator {
    /// Create a Seidel estimator.
    ///
    /// * `aberrations` - Apply the aberration terms; otherwise imaging is ideal.
    pub fn new(aberrations: bool) -> Self {
        Self { aberrations }
    }

    /// Returns the displacement in the normalized image plane (radial,
    /// axial) and the wavefront error.
    fn aberrate(ld: &LensData, y0: Float, rho: Float, sin_t: Float, cos_t: Float) -> (Vector2f, Float) {
        let rho2 = rho * rho;
        let rho3 = rho2 * rho;
        let y0_2 = y0 * y0;
        let y0_3 = y0_2 * y0;

        let mut delta = Vector2f::zero();
        let mut phi = 0.0;

        // Spherical.
        delta.x += ld.b * rho3 * sin_t;
        delta.y += ld.b * rho3 * cos_t;
        phi += -0.25 * ld.b * rho2 * rho2;

        // Coma.
        delta.x += -2.0 * ld.f * y0 * rho2 * sin_t * cos_t;
        delta.y += -ld.f * y0 * rho2 * (1.0 + 2.0 * cos_t * cos_t);
        phi += ld.f * y0 * rho3 * cos_t;

        // Astigmatism and field curvature.
        delta.x += ld.d * rho * y0_2 * sin_t;
        delta.y += (2.0 * ld.c + ld.d) * rho * y0_2 * cos_t;
        phi += -ld.c * y0_2 * rho2 * cos_t * cos_t - 0.5 * ld.d * y0_2 * rho2;

        // Distortion.
        delta.y += -ld.e * y0_3;
        phi += ld.e * y0_3 * rho * cos_t;

        (delta, phi)
    }
}

impl SensorEstimator for SeidelEstimator {
    fn sensor_position(&self, system: &LensSystem, input: &EstimatorInput) -> Option<Vector2f> {
        let ld = input.lens_data;
        let z = input.distance;

        let d0 = z + ld.entrance_pupil;
        let magnification = -ld.focal_length / (z + ld.principal_plane_front - ld.focal_length);
        let pupil_ratio = ld.magnification_ratio();

        // Normalized object coordinates and the frame aligned with them.
        let p0 = input.object / d0;
        let y0 = p0.length();
        let axial = if y0 != 0.0 { p0 / y0 } else { Vector2f::new(0.0, 1.0) };
        let radial = Vector2f::new(axial.y, -axial.x);

        let mut angle = clamp(axial.y, -1.0, 1.0).acos();
        if p0.x < 0.0 {
            angle = TWO_PI - angle;
        }
        let (sin_t, cos_t) = (input.theta - angle).sin_cos();

        let (delta, phi) = if self.aberrations {
            Self::aberrate(ld, y0, input.rho * ld.entrance_pupil_radius, sin_t, cos_t)
        } else {
            (Vector2f::zero(), 0.0)
        };

        let p1 = p0 + axial * delta.y + radial * delta.x;
        let d1 = d0 * magnification * pupil_ratio;
        let image_point = p1 * (d0 * magnification);

        // The sensor stays where the lens focuses the Seidel focus distance.
        let focus = system.focus_lens_data();
        let focus_distance = system.seidel_focus();
        let focus_magnification =
            -focus.focal_length / (focus_distance + focus.principal_plane_front - focus.focal_length);
        let focus_d1 = (focus_distance + focus.entrance_pupil) * focus_magnification * focus.magnification_ratio();
        let z_image = ld.exit_pupil - d1;
        let z_sensor = focus.exit_pupil - focus_d1;

        // Gaussian reference sphere around the ideal image point.
        let ideal = Vector3f::from_xy(input.object * magnification, z_image);
        let image = Vector3f::from_xy(image_point, z_image);
        let exit = Vector3f::from_xy(input.exit_point, ld.exit_pupil);
        let reference_radius = (ideal - Vector3f::new(0.0, 0.0, ld.exit_pupil)).length();
        let q = ideal + (exit - ideal).normalize() * (reference_radius - phi);

        let ray = image - q;
        let sensor = image + ray / ray.z * (z_sensor - z_image);
        let sensor = sensor.xy();
        if sensor.is_finite() {
            Some(sensor)
        } else {
            None
        }
    }
}

/// Traces a 3-D ray from the light source through the entrance pupil point
/// and every lens surface, then intersects the sensor plane.
#[derive(Copy, Clone, Debug, Default)]
pub struct RayTracedEstimator;

impl SensorEstimator for RayTracedEstimator {
    fn sensor_position(&self, system: &LensSystem, input: &EstimatorInput) -> Option<Vector2f> {
        let z = input.distance;
        let mut origin = Vector3f::from_xy(input.object, -z);
        let target = Vector3f::from_xy(input.entrance_point, input.lens_data.entrance_pupil);
        let direction = (target - origin).normalize();

        // Start close to the lens to limit precision loss for far objects.
        if z > SSRT_NEAR_OBJECT {
            origin += direction * (z - SSRT_START_DISTANCE);
        }

        let tracer = RayTracer::exact(system.prescription());
        let ray = tracer
            .trace_all(Ray::new(origin, direction), input.wavelength, TraceDirection::Forward)
            .ok()?;

        let sensor = ray.at_axial(system.sensor_position())?.xy();
        if sensor.is_finite() {
            Some(sensor)
        } else {
            None
        }
    }
}
