//! Aperture sprite

use dof_core::math::*;

/// Polar intensity table used to shape the aperture. Rows are indexed by
/// the unit pupil radius and columns by the unit pupil angle.
#[derive(Clone, Debug, PartialEq)]
pub struct ApertureSprite {
    values: Vec<u8>,
    size: usize,
    multiplier: Float,
}

impl ApertureSprite {
    /// Create a sprite from square 8-bit grayscale data. The multiplier is
    /// chosen so the mean weight over all cells is one.
    ///
    /// * `values` - Row-major gray values.
    /// * `width`  - Width of the data.
    /// * `height` - Height of the data.
    pub fn from_grayscale(values: Vec<u8>, width: usize, height: usize) -> Result<Self, String> {
        if width == 0 || width != height {
            return Err(format!("Aperture sprite must be square, got {width} x {height}."));
        }
        if values.len() != width * height {
            return Err(format!(
                "Aperture sprite of {width} x {height} cannot hold {} values.",
                values.len()
            ));
        }

        let sum: f64 = values.iter().map(|&v| v as f64 / 256.0).sum();
        if sum <= 0.0 {
            return Err("Aperture sprite is completely black.".to_string());
        }
        let multiplier = (values.len() as f64 / sum) as Float;

        Ok(Self {
            values,
            size: width,
            multiplier,
        })
    }

    /// Returns the number of cells along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the normalization multiplier.
    pub fn multiplier(&self) -> Float {
        self.multiplier
    }

    /// Returns the weight for a pupil coordinate.
    ///
    /// * `rho`   - Unit pupil radius in [0, 1).
    /// * `theta` - Unit pupil angle in [0, 1).
    pub fn weight(&self, rho: Float, theta: Float) -> Float {
        let cell = |u: Float| min((clamp(u, 0.0, 1.0) * self.size as Float) as usize, self.size - 1);
        let v = self.values[self.size * cell(rho) + cell(theta)];
        self.multiplier * v as Float / 256.0
    }
}
