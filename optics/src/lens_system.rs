//! Lens system

use crate::lens_data::*;
use crate::paraxial::*;
use crate::prescription::*;
use crate::table::*;
use crate::tracer::*;
use dof_core::geometry::*;
use dof_core::math::*;
use dof_core::spectrum::*;

/// Default sensor width in meters (full frame).
pub const DEFAULT_SENSOR_WIDTH: Float = 0.036;

/// Default focus distance in meters.
pub const DEFAULT_FOCUS_DISTANCE: Float = 2.0;

/// Wavelengths sampled when averaging focus positions: 0.36 um in steps of
/// 0.05 um while below 0.83 um.
const FOCUS_WAVELENGTHS: usize = 10;
const FOCUS_WAVELENGTH_STEP: Float = 0.05;

/// Pupil fractions sampled when locating the sensor: 0.01 in steps of 0.05
/// while below 1.
const SENSOR_PARTS: usize = 20;

/// Fraction of the exit pupil radius used for the paraxial focus rays.
const PARAXIAL_PART: Float = 0.001;

/// Settings for building a `LensSystem`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LensSystemConfig {
    /// Distance in meters the lens is focused at.
    pub focus_distance: Float,

    /// Stop aperture scale in [0, 1].
    pub aperture_scale: Float,

    /// Lens data table bins per axis.
    pub grid_size: usize,

    /// Nearest tabulated object distance.
    pub near: Float,

    /// Farthest tabulated object distance.
    pub far: Float,

    /// Sensor width in meters.
    pub sensor_width: Float,
}

impl Default for LensSystemConfig {
    fn default() -> Self {
        Self {
            focus_distance: DEFAULT_FOCUS_DISTANCE,
            aperture_scale: 1.0,
            grid_size: DEFAULT_GRID_SIZE,
            near: DEFAULT_NEAR_DISTANCE,
            far: DEFAULT_FAR_DISTANCE,
            sensor_width: DEFAULT_SENSOR_WIDTH,
        }
    }
}

/// Focal length spread over the tabulated wavelengths.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FocalLengthStats {
    /// Shortest focal length.
    pub min: Float,

    /// Wavelength of the shortest focal length.
    pub min_wavelength: Float,

    /// Mean focal length.
    pub mean: Float,

    /// Longest focal length.
    pub max: Float,

    /// Wavelength of the longest focal length.
    pub max_wavelength: Float,
}

/// A lens prescription with its precomputed lens data and the derived
/// sensor placement.
#[derive(Clone, Debug)]
pub struct LensSystem {
    prescription: LensPrescription,
    config: LensSystemConfig,
    table: LensDataTable,
    mean_lens_data: LensData,
    focus_lens_data: LensData,
    sensor_position: Float,
    seidel_focus: Float,
    focal_lengths: FocalLengthStats,
    mean_f_number: Float,
}

impl LensSystem {
    /// Scales the stop, builds the lens data table and places the sensor.
    ///
    /// * `prescription` - The imported lens.
    /// * `config`       - Settings.
    pub fn new(prescription: LensPrescription, config: LensSystemConfig) -> Result<Self, String> {
        if !(config.focus_distance > 0.0 && config.focus_distance.is_finite()) {
            return Err(format!("Invalid focus distance {}", config.focus_distance));
        }
        if !(config.sensor_width > 0.0) {
            return Err(format!("Invalid sensor width {}", config.sensor_width));
        }

        let mut prescription = prescription;
        prescription.set_aperture_scale(config.aperture_scale)?;

        let table = LensDataTable::build(&prescription, config.grid_size, config.near, config.far)?;
        let mean_lens_data = table.query(REFERENCE_WAVELENGTH, config.focus_distance);

        let mut system = Self {
            prescription,
            config,
            table,
            mean_lens_data,
            focus_lens_data: mean_lens_data,
            sensor_position: 0.0,
            seidel_focus: config.focus_distance,
            focal_lengths: FocalLengthStats::default(),
            mean_f_number: 0.0,
        };

        system.compute_statistics();
        system.sensor_position = system.locate_sensor()?;
        system.seidel_focus = system.locate_seidel_focus();
        system.focus_lens_data = system.table.query(REFERENCE_WAVELENGTH, system.seidel_focus);

        info!(
            "Focal length min {:.3}mm ({:.0}nm), mean {:.3}mm, max {:.3}mm ({:.0}nm)",
            1000.0 * system.focal_lengths.min,
            1000.0 * system.focal_lengths.min_wavelength,
            1000.0 * system.focal_lengths.mean,
            1000.0 * system.focal_lengths.max,
            1000.0 * system.focal_lengths.max_wavelength
        );
        info!("Mean f-number f/{:.2}", system.mean_f_number);
        info!(
            "Field of view {:.2} degrees for a {}mm sensor",
            system.field_of_view(),
            1000.0 * config.sensor_width
        );
        let m = &system.mean_lens_data;
        info!(
            "Seidel coefficients B {:e}, C {:e}, D {:e}, E {:e}, F {:e}",
            m.b, m.c, m.d, m.e, m.f
        );
        info!(
            "Focus {}m, sensor position {}m, Seidel focus {}m",
            config.focus_distance, system.sensor_position, system.seidel_focus
        );

        Ok(system)
    }

    /// Collects focal length and f-number statistics from the first column of
    /// every wavelength row.
    fn compute_statistics(&mut self) {
        let n = self.table.grid_size();
        let mut stats = FocalLengthStats {
            min: Float::INFINITY,
            max: Float::NEG_INFINITY,
            ..Default::default()
        };
        let mut f_number = 0.0;

        for i in 0..n {
            let wavelength = self.table.wavelength_at(i);
            let ld = match self.table.cell(i, 0) {
                Some(ld) => ld,
                None => continue,
            };
            if ld.focal_length < stats.min {
                stats.min = ld.focal_length;
                stats.min_wavelength = wavelength;
            }
            if ld.focal_length > stats.max {
                stats.max = ld.focal_length;
                stats.max_wavelength = wavelength;
            }
            stats.mean += ld.focal_length;
            f_number += ld.f_number();
        }

        stats.mean /= n as Float;
        self.focal_lengths = stats;
        self.mean_f_number = f_number / n as Float;
    }

    /// Returns the wavelengths used for focus averaging with their luminance
    /// weights.
    fn focus_wavelengths() -> impl Iterator<Item = (Float, Float)> {
        (0..FOCUS_WAVELENGTHS).map(|i| {
            let wavelength = VISIBLE_MIN_WAVELENGTH + i as Float * FOCUS_WAVELENGTH_STEP;
            (wavelength, Cie1931.luminance(wavelength))
        })
    }

    /// Traces two rays forward or backward through the whole lens and
    /// returns where they cross.
    fn trace_pair(
        &self,
        origin: Vector2f,
        d1: Vector2f,
        d2: Vector2f,
        wavelength: Float,
        direction: TraceDirection,
    ) -> Option<Vector2f> {
        let tracer = RayTracer::exact(&self.prescription);
        let r1 = tracer.trace_all(Ray::new(origin, d1), wavelength, direction).ok()?;
        let r2 = tracer.trace_all(Ray::new(origin, d2), wavelength, direction).ok()?;
        intersect_lines(r1.o, r1.d, r2.o, r2.d)
    }

    /// Luminance weighted mean axial crossing of ray pairs from the focused
    /// object point through the entrance pupil. Falls back to the paraxial
    /// image when no pair makes it through.
    fn locate_sensor(&self) -> Result<Float, String> {
        let focus = self.config.focus_distance;
        let origin = Vector2f::new(-focus, 0.0);

        let mut total_weight = 0.0;
        let mut position = 0.0;
        let mut failed = 0;
        for (wavelength, weight) in Self::focus_wavelengths() {
            let ld = self.table.query(wavelength, focus);
            for k in 0..SENSOR_PARTS {
                let part = 0.01 + k as Float * 0.05;
                let height = ld.entrance_pupil_radius * part;
                let d1 = (Vector2f::new(ld.entrance_pupil, height) - origin).normalize();
                let d2 = (Vector2f::new(ld.entrance_pupil, -height) - origin).normalize();
                match self.trace_pair(origin, d1, d2, wavelength, TraceDirection::Forward) {
                    Some(p) => {
                        position += weight * p.x;
                        total_weight += weight;
                    }
                    None => failed += 1,
                }
            }
        }

        if failed > 0 {
            debug!("{} sensor ray pairs failed", failed);
        }
        if total_weight > 0.0 {
            return Ok(position / total_weight);
        }

        warn!("No ray pair reached the sensor; using the paraxial image");
        ParaxialSystem::new(&self.prescription, REFERENCE_WAVELENGTH)
            .image_position(-focus)
            .ok_or_else(|| format!("Lens forms no image of an object at {}m", focus))
    }

    /// Object distance that paraxial rays from the sensor position focus at,
    /// averaged over wavelength. Falls back to the focus distance.
    fn locate_seidel_focus(&self) -> Float {
        let focus = self.config.focus_distance;
        let origin = Vector2f::new(self.sensor_position, 0.0);

        let mut total_weight = 0.0;
        let mut position = 0.0;
        for (wavelength, weight) in Self::focus_wavelengths() {
            let ld = self.table.query(wavelength, focus);
            let height = ld.exit_pupil_radius * PARAXIAL_PART;
            let mut d1 = (Vector2f::new(ld.exit_pupil, height) - origin).normalize();
            let mut d2 = (Vector2f::new(ld.exit_pupil, -height) - origin).normalize();
            if ld.exit_pupil > self.sensor_position {
                d1 = -d1;
                d2 = -d2;
            }
            if let Some(p) = self.trace_pair(origin, d1, d2, wavelength, TraceDirection::Backward) {
                position += weight * p.x;
                total_weight += weight;
            }
        }

        let seidel_focus = -position / total_weight;
        if total_weight > 0.0 && seidel_focus.is_finite() && seidel_focus > 0.0 {
            seidel_focus
        } else {
            warn!("Seidel focus could not be traced; using the focus distance");
            focus
        }
    }

    /// Returns the prescription with the stop scaled.
    pub fn prescription(&self) -> &LensPrescription {
        &self.prescription
    }

    /// Returns the settings.
    pub fn config(&self) -> &LensSystemConfig {
        &self.config
    }

    /// Returns the lens data table.
    pub fn table(&self) -> &LensDataTable {
        &self.table
    }

    /// Returns interpolated lens data.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    /// * `distance`   - Object distance in meters.
    pub fn lens_data(&self, wavelength: Float, distance: Float) -> LensData {
        self.table.query(wavelength, distance)
    }

    /// Returns the lens data at the reference wavelength and focus distance.
    pub fn mean_lens_data(&self) -> &LensData {
        &self.mean_lens_data
    }

    /// Returns the lens data at the reference wavelength and Seidel focus.
    pub fn focus_lens_data(&self) -> &LensData {
        &self.focus_lens_data
    }

    /// Returns the axial sensor position.
    pub fn sensor_position(&self) -> Float {
        self.sensor_position
    }

    /// Returns the focus distance to use with the Seidel estimator.
    pub fn seidel_focus(&self) -> Float {
        self.seidel_focus
    }

    /// Returns the focus distance.
    pub fn focus_distance(&self) -> Float {
        self.config.focus_distance
    }

    /// Returns the sensor width.
    pub fn sensor_width(&self) -> Float {
        self.config.sensor_width
    }

    /// Returns focal length statistics.
    pub fn focal_lengths(&self) -> &FocalLengthStats {
        &self.focal_lengths
    }

    /// Returns the mean f-number.
    pub fn mean_f_number(&self) -> Float {
        self.mean_f_number
    }

    /// Returns the horizontal field of view in degrees at the mean focal
    /// length.
    pub fn field_of_view(&self) -> Float {
        2.0 * (self.config.sensor_width / (2.0 * self.focal_lengths.mean)).atan() * 180.0 / PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glass::*;

    fn singlet() -> LensPrescription {
        import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription
    }

    fn config() -> LensSystemConfig {
        LensSystemConfig {
            grid_size: 8,
            ..Default::default()
        }
    }

    #[test]
    fn sensor_near_paraxial_image() {
        let system = LensSystem::new(singlet(), config()).unwrap();
        let paraxial = ParaxialSystem::new(system.prescription(), REFERENCE_WAVELENGTH)
            .image_position(-2.0)
            .unwrap();
        let sensor = system.sensor_position();
        assert!(abs(sensor - paraxial) < 5e-4, "sensor {sensor}, paraxial {paraxial}");
    }

    #[test]
    fn seidel_focus_is_plausible() {
        let system = LensSystem::new(singlet(), config()).unwrap();
        let focus = system.seidel_focus();
        assert!(focus > 1.0 && focus < 4.0, "{focus}");
        assert_eq!(
            *system.focus_lens_data(),
            system.lens_data(REFERENCE_WAVELENGTH, focus)
        );
    }

    #[test]
    fn statistics() {
        let system = LensSystem::new(singlet(), config()).unwrap();
        let stats = system.focal_lengths();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        // Normal dispersion: blue focuses shorter.
        assert!(stats.min_wavelength < stats.max_wavelength);
        assert!(stats.mean > 0.049 && stats.mean < 0.053);
        assert!(system.mean_f_number() > 11.0 && system.mean_f_number() < 14.0);
        assert!(system.field_of_view() > 35.0 && system.field_of_view() < 42.0);
        assert_eq!(*system.mean_lens_data(), system.lens_data(REFERENCE_WAVELENGTH, 2.0));
    }

    #[test]
    fn aperture_scale_shrinks_pupil() {
        let full = LensSystem::new(singlet(), config()).unwrap();
        let half = LensSystem::new(
            singlet(),
            LensSystemConfig {
                aperture_scale: 0.5,
                ..config()
            },
        )
        .unwrap();
        let ratio = half.mean_lens_data().entrance_pupil_radius / full.mean_lens_data().entrance_pupil_radius;
        assert!(abs(ratio - 0.5) < 0.01, "{ratio}");
    }

    #[test]
    fn invalid_config() {
        let bad_aperture = LensSystemConfig {
            aperture_scale: 2.0,
            ..config()
        };
        assert!(LensSystem::new(singlet(), bad_aperture).is_err());
        let bad_focus = LensSystemConfig {
            focus_distance: 0.0,
            ..config()
        };
        assert!(LensSystem::new(singlet(), bad_focus).is_err());
    }
}
