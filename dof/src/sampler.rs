//! Depth of field sampler

use crate::estimator::*;
use crate::sample::*;
use crate::sprite::*;
use dof_core::geometry::*;
use dof_core::math::*;
use dof_core::rng::RNG;
use dof_core::spectrum::{SpectralColor, REFERENCE_WAVELENGTH, VISIBLE_MAX_WAVELENGTH, VISIBLE_MIN_WAVELENGTH};
use optics::*;
use std::fmt;

/// How pupil coordinates are drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PupilSampling {
    /// Uniform over the pupil disk.
    Disk,

    /// Uniform in unit radius and angle, weighted by the aperture sprite.
    Sprite,

    /// A single fixed point at half the pupil radius.
    Coc,
}

/// Sampler settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Sensor position estimator.
    pub estimator: EstimatorKind,

    /// Sample wavelengths across the visible range.
    pub chromatic: bool,

    /// Apply Seidel aberrations.
    pub aberrations: bool,

    /// Clip samples against the first lens element.
    pub vignetting: bool,

    /// Use the mean lens data instead of querying the table.
    pub fixed_lens_data: bool,

    /// Jitter sample positions inside the source pixel.
    pub jitter: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::Seidel,
            chromatic: true,
            aberrations: true,
            vignetting: false,
            fixed_lens_data: false,
            jitter: true,
        }
    }
}

/// Where the light of a valid sample lands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorHit {
    /// Sensor position in meters.
    pub position: Vector2f,

    /// Output pixel column; may lie outside the image.
    pub x: i64,

    /// Output pixel row; may lie outside the image.
    pub y: i64,

    /// Color weight of the sample's wavelength and pupil position.
    pub color: [Float; 3],
}

/// Why a sample was discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleFailure {
    /// Blocked by the first lens element.
    Vignetted,

    /// The estimator failed or produced a non-finite result.
    Invalid,
}

impl fmt::Display for SampleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFailure::Vignetted => write!(f, "vignetted"),
            SampleFailure::Invalid => write!(f, "invalid"),
        }
    }
}

/// Maps source pixels and their depth to sensor positions through a lens.
pub struct DofSampler<'a> {
    system: &'a LensSystem,
    config: SamplerConfig,
    estimator: Box<dyn SensorEstimator>,
    sprite: Option<&'a ApertureSprite>,
    spectral: SpectralColor,
    width: usize,
    height: usize,

    /// Field of view at 1 m.
    fov_per_meter: Float,
}

impl<'a> DofSampler<'a> {
    /// Create a sampler for an image of the given size.
    ///
    /// * `system` - The lens system.
    /// * `config` - Sampler settings.
    /// * `sprite` - Optional aperture sprite; enables sprite sampling.
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(
        system: &'a LensSystem,
        config: SamplerConfig,
        sprite: Option<&'a ApertureSprite>,
        width: usize,
        height: usize,
    ) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!("Cannot sample an image of {width} x {height}."));
        }

        let image_distance = system.sensor_position() - system.mean_lens_data().principal_plane_rear;
        let fov_per_meter = system.sensor_width() / image_distance;
        if !(fov_per_meter.is_finite() && fov_per_meter > 0.0) {
            return Err(format!(
                "Sensor at {} lies in front of the rear principal plane.",
                system.sensor_position()
            ));
        }

        Ok(Self {
            system,
            config,
            estimator: config.estimator.create(config.aberrations),
            sprite,
            spectral: SpectralColor::default(),
            width,
            height,
            fov_per_meter,
        })
    }

    /// Returns the sampler settings.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Returns the lens system.
    pub fn system(&self) -> &LensSystem {
        self.system
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pupil sampling used for rendering.
    pub fn pupil_sampling(&self) -> PupilSampling {
        if self.sprite.is_some() {
            PupilSampling::Sprite
        } else {
            PupilSampling::Disk
        }
    }

    /// Draws a sample for a source pixel.
    ///
    /// * `x`        - Source pixel column.
    /// * `y`        - Source pixel row.
    /// * `rng`      - Random number generator.
    /// * `sampling` - Pupil sampling mode.
    pub fn draw(&self, x: usize, y: usize, rng: &mut RNG, sampling: PupilSampling) -> Sample {
        let wavelength = if self.config.chromatic && sampling == PupilSampling::Disk {
            lerp(rng.uniform_float(), VISIBLE_MIN_WAVELENGTH, VISIBLE_MAX_WAVELENGTH)
        } else {
            REFERENCE_WAVELENGTH
        };

        let jitter = if self.config.jitter && sampling != PupilSampling::Coc {
            Vector2f::new(rng.uniform_float() - 0.5, rng.uniform_float() - 0.5)
        } else {
            Vector2f::zero()
        };

        let (theta, rho) = match sampling {
            PupilSampling::Disk => {
                let theta = rng.uniform_float();
                (theta, rng.uniform_float().sqrt())
            }
            PupilSampling::Sprite => {
                let theta = rng.uniform_float();
                (theta, rng.uniform_float())
            }
            PupilSampling::Coc => (0.0, 0.5),
        };

        Sample {
            x,
            y,
            wavelength,
            jitter,
            theta,
            rho,
        }
    }

    /// Returns the light source position in front of the lens for a sample
    /// position on the image and the source depth.
    ///
    /// * `sample` - The sample.
    /// * `depth`  - Distance of the source in meters.
    pub fn object_point(&self, sample: &Sample, depth: Float) -> Vector2f {
        let half = Vector2f::new(self.width as Float, self.height as Float) * 0.5;
        (sample.image_position() - half) / self.width as Float * (self.fov_per_meter * depth)
    }

    /// Follows a sample to the sensor.
    ///
    /// * `sample`   - The sample.
    /// * `depth`    - Distance of the source in meters.
    /// * `sampling` - Pupil sampling the sample was drawn with.
    pub fn trace(&self, sample: &Sample, depth: Float, sampling: PupilSampling) -> Result<SensorHit, SampleFailure> {
        let object = self.object_point(sample, depth);
        let distance = (depth * depth - object.length_squared()).sqrt();
        if !(distance.is_finite() && distance > 0.0) {
            return Err(SampleFailure::Invalid);
        }

        let lens_data = if self.config.fixed_lens_data {
            *self.system.mean_lens_data()
        } else {
            self.system.lens_data(sample.wavelength, distance)
        };

        let exit_point = sample.unit_pupil_point() * lens_data.exit_pupil_radius;
        let entrance_point = exit_point / lens_data.magnification_ratio();
        if !entrance_point.is_finite() {
            return Err(SampleFailure::Invalid);
        }

        if self.config.vignetting && !self.passes_front_element(object, distance, entrance_point, &lens_data) {
            return Err(SampleFailure::Vignetted);
        }

        let input = EstimatorInput {
            lens_data: &lens_data,
            wavelength: sample.wavelength,
            object,
            distance,
            entrance_point,
            exit_point,
            theta: sample.angle(),
            rho: sample.rho,
        };
        let position = self
            .estimator
            .sensor_position(self.system, &input)
            .ok_or(SampleFailure::Invalid)?;

        let (x, y) = self.sensor_pixel(position).ok_or(SampleFailure::Invalid)?;

        let mut color = if self.config.chromatic && sampling == PupilSampling::Disk {
            self.spectral.color(sample.wavelength)
        } else {
            [1.0; 3]
        };
        if let (PupilSampling::Sprite, Some(sprite)) = (sampling, self.sprite) {
            let w = sprite.weight(sample.rho, sample.theta);
            color = color.map(|c| c * w);
        }

        Ok(SensorHit { position, x, y, color })
    }

    /// Returns the squared pixel distance between a source pixel and where
    /// its in-focus light lands, or `None` if the sample is invalid.
    ///
    /// * `x`     - Source pixel column.
    /// * `y`     - Source pixel row.
    /// * `depth` - Distance of the source in meters.
    pub fn circle_of_confusion(&self, x: usize, y: usize, depth: Float) -> Option<Float> {
        let mut rng = RNG::default();
        let sample = self.draw(x, y, &mut rng, PupilSampling::Coc);
        let hit = self.trace(&sample, depth, PupilSampling::Coc).ok()?;
        let dx = (x as i64 - hit.x) as Float;
        let dy = (y as i64 - hit.y) as Float;
        Some(dx * dx + dy * dy)
    }

    /// Returns the output pixel for a sensor position. The image is flipped
    /// and the sensor width spans the image width.
    fn sensor_pixel(&self, position: Vector2f) -> Option<(i64, i64)> {
        let w = self.width as Float;
        let p = -position / self.system.sensor_width() * w;
        let x = (p.x + 0.5 * w).floor();
        let y = (p.y + 0.5 * self.height as Float).floor();
        if x.is_finite() && y.is_finite() {
            Some((x as i64, y as i64))
        } else {
            None
        }
    }

    /// Returns true if the straight line from the source to the entrance
    /// pupil point fits inside the first element's clear aperture.
    fn passes_front_element(&self, object: Vector2f, distance: Float, entrance_point: Vector2f, ld: &LensData) -> bool {
        let prescription = self.system.prescription();
        let front = prescription.surface(0);
        let direction = (entrance_point - object) / (distance + ld.entrance_pupil);
        let opening = object + direction * (distance + prescription.front_vertex());
        opening.length_squared() <= front.aperture * front.aperture
    }
}
