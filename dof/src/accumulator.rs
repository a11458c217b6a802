//! Accumulator

use dof_core::math::*;
use dof_core::parallel::AtomicFloat;
use std::sync::atomic::Ordering;

/// Summed weighted color and summed weight of one output pixel.
#[derive(Default)]
pub struct AccumulatorCell {
    rgb: [AtomicFloat; 3],
    weight: AtomicFloat,
}

impl AccumulatorCell {
    /// Returns the summed color and weight.
    pub fn load(&self) -> ([Float; 3], Float) {
        (
            [
                self.rgb[0].load(Ordering::Relaxed),
                self.rgb[1].load(Ordering::Relaxed),
                self.rgb[2].load(Ordering::Relaxed),
            ],
            self.weight.load(Ordering::Relaxed),
        )
    }
}

/// Output buffer shared by all render workers. Cells are only ever added to
/// while rendering and are read when the caller resolves an image.
pub struct Accumulator {
    cells: Vec<AccumulatorCell>,
    width: usize,
    height: usize,
}

impl Accumulator {
    /// Create an empty accumulator.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, AccumulatorCell::default);
        Self { cells, width, height }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Adds `rgb * weight` and `weight` to a pixel. Returns false when the
    /// pixel lies outside the buffer or the contribution is not finite.
    ///
    /// * `x`      - Column; may be negative.
    /// * `y`      - Row; may be negative.
    /// * `rgb`    - Color of the contribution.
    /// * `weight` - Weight of the contribution.
    pub fn add(&self, x: i64, y: i64, rgb: [Float; 3], weight: Float) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        if !(weight.is_finite() && rgb.iter().all(|c| c.is_finite())) {
            warn!("Ignoring non-finite contribution at ({}, {})", x, y);
            return false;
        }

        let cell = &self.cells[y as usize * self.width + x as usize];
        for (sum, c) in cell.rgb.iter().zip(rgb) {
            sum.add(c * weight);
        }
        cell.weight.add(weight);
        true
    }

    /// Returns the cell at `(x, y)` or `None` if out of bounds.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get(&self, x: usize, y: usize) -> Option<&AccumulatorCell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Returns the sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.cells
            .iter()
            .map(|c| c.weight.load(Ordering::Relaxed) as f64)
            .sum()
    }

    /// Resets every cell to zero.
    pub fn clear(&self) {
        for cell in self.cells.iter() {
            for c in cell.rgb.iter() {
                c.store(0.0, Ordering::Relaxed);
            }
            cell.weight.store(0.0, Ordering::Relaxed);
        }
    }

    /// Returns row-major RGBA values. Color is `rgb * exposure`, divided by
    /// the weight when `normalize` is set; alpha holds the weight. Pixels
    /// without weight are black.
    ///
    /// * `exposure`  - Exposure multiplier.
    /// * `normalize` - Divide by the accumulated weight.
    pub fn resolve(&self, exposure: Float, normalize: bool) -> Vec<Float> {
        let mut rgba = Vec::with_capacity(4 * self.cells.len());
        for cell in self.cells.iter() {
            let (rgb, weight) = cell.load();
            let scale = if !normalize {
                exposure
            } else if weight > 0.0 {
                exposure / weight
            } else {
                0.0
            };
            rgba.extend_from_slice(&[rgb[0] * scale, rgb[1] * scale, rgb[2] * scale, weight]);
        }
        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn out_of_bounds_is_discarded() {
        let acc = Accumulator::new(4, 3);
        assert!(!acc.add(-1, 0, [1.0; 3], 1.0));
        assert!(!acc.add(0, -1, [1.0; 3], 1.0));
        assert!(!acc.add(4, 0, [1.0; 3], 1.0));
        assert!(!acc.add(0, 3, [1.0; 3], 1.0));
        assert!(acc.add(3, 2, [1.0; 3], 1.0));
        assert_eq!(acc.total_weight(), 1.0);
    }

    #[test]
    fn non_finite_is_discarded() {
        let acc = Accumulator::new(2, 2);
        assert!(!acc.add(0, 0, [Float::NAN, 0.0, 0.0], 1.0));
        assert!(!acc.add(0, 0, [1.0; 3], Float::INFINITY));
        assert_eq!(acc.total_weight(), 0.0);
    }

    #[test]
    fn resolve_normalizes_by_weight() {
        let acc = Accumulator::new(2, 1);
        acc.add(0, 0, [1.0, 2.0, 4.0], 0.5);
        acc.add(0, 0, [3.0, 2.0, 0.0], 1.5);

        let rgba = acc.resolve(2.0, true);
        assert_eq!(rgba.len(), 8);
        assert!(approx_eq!(f32, rgba[0], 2.0 * (0.5 + 4.5) / 2.0, ulps = 4));
        assert!(approx_eq!(f32, rgba[1], 2.0 * (1.0 + 3.0) / 2.0, ulps = 4));
        assert!(approx_eq!(f32, rgba[2], 2.0 * 2.0 / 2.0, ulps = 4));
        assert_eq!(rgba[3], 2.0);
        assert_eq!(&rgba[4..], &[0.0; 4]);

        let raw = acc.resolve(1.0, false);
        assert!(approx_eq!(f32, raw[0], 5.0, ulps = 4));
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let acc = Accumulator::new(1, 1);
        crossbeam::scope(|scope| {
            for _ in 0..8 {
                let acc = &acc;
                scope.spawn(move |_| {
                    for _ in 0..1000 {
                        acc.add(0, 0, [1.0; 3], 1.0);
                    }
                });
            }
        })
        .unwrap();
        assert_eq!(acc.total_weight(), 8000.0);
        let (rgb, _) = acc.get(0, 0).unwrap().load();
        assert_eq!(rgb, [8000.0; 3]);

        acc.clear();
        assert_eq!(acc.total_weight(), 0.0);
    }
}
