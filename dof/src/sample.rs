//! Samples

use dof_core::geometry::*;
use dof_core::math::*;

/// One stochastic light path from a source pixel through the pupil.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Source pixel column.
    pub x: usize,

    /// Source pixel row.
    pub y: usize,

    /// Wavelength in micrometers.
    pub wavelength: Float,

    /// Sub-pixel offset in [-0.5, 0.5) on each axis.
    pub jitter: Vector2f,

    /// Unit pupil angle in [0, 1).
    pub theta: Float,

    /// Unit pupil radius in [0, 1].
    pub rho: Float,
}

impl Sample {
    /// Returns the pupil angle in radians.
    pub fn angle(&self) -> Float {
        self.theta * TWO_PI
    }

    /// Returns the point on the unit pupil. The angle is measured from the
    /// y-axis.
    pub fn unit_pupil_point(&self) -> Vector2f {
        let (sin, cos) = self.angle().sin_cos();
        Vector2f::new(sin, cos) * self.rho
    }

    /// Returns the position of the sample on the source image in pixels.
    pub fn image_position(&self) -> Vector2f {
        Vector2f::new(self.x as Float + 0.5, self.y as Float + 0.5) + self.jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn sample(theta: Float, rho: Float) -> Sample {
        Sample {
            x: 3,
            y: 4,
            wavelength: 0.55,
            jitter: Vector2f::new(-0.25, 0.25),
            theta,
            rho,
        }
    }

    #[test]
    fn angle_starts_on_y_axis() {
        let p = sample(0.0, 0.5).unit_pupil_point();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.5);

        let p = sample(0.25, 1.0).unit_pupil_point();
        assert!(approx_eq!(f32, p.x, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.y, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn image_position_includes_jitter() {
        let p = sample(0.0, 0.0).image_position();
        assert_eq!(p.x, 3.25);
        assert_eq!(p.y, 4.75);
    }
}
