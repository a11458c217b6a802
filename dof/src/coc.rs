//! Circle of confusion map

use dof_core::math::*;

/// Per-pixel squared distance, in pixels, between a source pixel and where
/// its light lands on the sensor at the reference wavelength.
#[derive(Clone, Debug, PartialEq)]
pub struct CocMap {
    values: Vec<Float>,
    width: usize,
    height: usize,
}

impl CocMap {
    /// Create a map with every value zero.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            values: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Create a map from row-major values.
    ///
    /// * `values` - Squared pixel distances.
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn from_values(values: Vec<Float>, width: usize, height: usize) -> Result<Self, String> {
        if values.len() != width * height {
            return Err(format!(
                "CoC map of {width} x {height} cannot hold {} values.",
                values.len()
            ));
        }
        Ok(Self { values, width, height })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the value at `(x, y)` or `None` if out of bounds.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get(&self, x: usize, y: usize) -> Option<Float> {
        if x < self.width && y < self.height {
            self.values.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Sets the value at `(x, y)`. Out of bounds writes are ignored.
    ///
    /// * `x`     - Column.
    /// * `y`     - Row.
    /// * `value` - Squared pixel distance.
    pub fn set(&mut self, x: usize, y: usize, value: Float) {
        if x < self.width && y < self.height {
            self.values[y * self.width + x] = value;
        }
    }

    /// Returns the largest value.
    pub fn max_value(&self) -> Float {
        self.values.iter().fold(0.0, |m, &v| max(m, v))
    }

    /// Returns gray RGBA values with alpha 1, suitable for `write_image`.
    pub fn to_rgba(&self) -> Vec<Float> {
        self.values.iter().flat_map(|&v| [v, v, v, 1.0]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_access() {
        let mut coc = CocMap::new(3, 2);
        coc.set(2, 1, 9.0);
        coc.set(3, 1, 4.0);
        assert_eq!(coc.get(2, 1), Some(9.0));
        assert_eq!(coc.get(3, 1), None);
        assert_eq!(coc.max_value(), 9.0);

        let rgba = coc.to_rgba();
        assert_eq!(rgba.len(), 24);
        assert_eq!(&rgba[20..], &[9.0, 9.0, 9.0, 1.0]);
    }

    #[test]
    fn from_values_checks_size() {
        assert!(CocMap::from_values(vec![0.0; 5], 3, 2).is_err());
        assert!(CocMap::from_values(vec![0.0; 6], 3, 2).is_ok());
    }
}
