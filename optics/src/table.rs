//! Lens data table

use crate::lens_data::*;
use crate::paraxial::*;
use crate::prescription::*;
use crate::pupil::*;
use crate::seidel::*;
use dof_core::math::*;
use dof_core::spectrum::{VISIBLE_MAX_WAVELENGTH, VISIBLE_MIN_WAVELENGTH};
use rayon::prelude::*;

/// Default number of bins along each axis.
pub const DEFAULT_GRID_SIZE: usize = 64;

/// Default nearest tabulated object distance in meters.
pub const DEFAULT_NEAR_DISTANCE: Float = 0.2;

/// Default farthest tabulated object distance in meters.
pub const DEFAULT_FAR_DISTANCE: Float = 15.0;

/// Positions closer than this (in bins) to a grid node are snapped to it.
const NODE_SNAP: Float = 1e-4;

/// Precomputed `LensData` over a grid of wavelengths (rows) and object
/// distances (columns), both uniform and inclusive of their bounds.
#[derive(Clone, Debug)]
pub struct LensDataTable {
    grid_size: usize,
    wavelengths: (Float, Float),
    distances: (Float, Float),
    cells: Vec<LensData>,
    replaced: usize,
}

impl LensDataTable {
    /// Runs the pupil solver once per wavelength row and the Seidel
    /// generator once per cell. Rows are built in parallel.
    ///
    /// * `prescription` - The lens.
    /// * `grid_size`    - Bins per axis; at least 2.
    /// * `near`         - Nearest object distance.
    /// * `far`          - Farthest object distance.
    pub fn build(prescription: &LensPrescription, grid_size: usize, near: Float, far: Float) -> Result<Self, String> {
        if grid_size < 2 {
            return Err(format!("Lens data grid needs at least 2 bins, got {}", grid_size));
        }
        if !(near > 0.0 && far > near && far.is_finite()) {
            return Err(format!("Invalid lens data distance range [{}, {}]", near, far));
        }

        let mut table = Self {
            grid_size,
            wavelengths: (VISIBLE_MIN_WAVELENGTH, VISIBLE_MAX_WAVELENGTH),
            distances: (near, far),
            cells: vec![],
            replaced: 0,
        };

        let rows: Vec<(Vec<LensData>, usize)> = (0..grid_size)
            .into_par_iter()
            .map(|i| table.build_row(prescription, table.wavelength_at(i)))
            .collect();

        for (row, replaced) in rows {
            table.cells.extend(row);
            table.replaced += replaced;
        }

        if table.replaced > 0 {
            warn!(
                "Replaced {} non-finite lens data values with zero",
                table.replaced
            );
        }
        debug!("Built {}x{} lens data table", grid_size, grid_size);

        Ok(table)
    }

    /// Computes one wavelength row and returns it with the number of
    /// non-finite values that were replaced.
    fn build_row(&self, prescription: &LensPrescription, wavelength: Float) -> (Vec<LensData>, usize) {
        let pupils = solve_pupils(prescription, wavelength);
        let paraxial = ParaxialSystem::new(prescription, wavelength);
        let focal_length = paraxial.focal_length();
        let principal_plane_front = paraxial.principal_plane_front();
        let principal_plane_rear = paraxial.principal_plane_rear();

        let mut replaced = 0;
        let row = (0..self.grid_size)
            .map(|j| {
                let distance = self.distance_at(j);
                let seidel = seidel_coefficients(prescription, wavelength, distance, pupils.entrance_pupil);
                let mut ld = LensData::new(
                    &seidel,
                    &pupils,
                    focal_length,
                    principal_plane_front,
                    principal_plane_rear,
                );
                replaced += ld.sanitize();
                ld
            })
            .collect();
        (row, replaced)
    }

    /// Returns the number of bins per axis.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Returns the tabulated wavelength range in micrometers.
    pub fn wavelength_range(&self) -> (Float, Float) {
        self.wavelengths
    }

    /// Returns the tabulated object distance range in meters.
    pub fn distance_range(&self) -> (Float, Float) {
        self.distances
    }

    /// Returns the number of non-finite values replaced while building.
    pub fn replaced_values(&self) -> usize {
        self.replaced
    }

    /// Returns the wavelength of row `i`.
    ///
    /// * `i` - Row index.
    pub fn wavelength_at(&self, i: usize) -> Float {
        node(self.wavelengths, i, self.grid_size)
    }

    /// Returns the object distance of column `j`.
    ///
    /// * `j` - Column index.
    pub fn distance_at(&self, j: usize) -> Float {
        node(self.distances, j, self.grid_size)
    }

    /// Returns a cell or `None` when out of bounds.
    ///
    /// * `i` - Wavelength row.
    /// * `j` - Distance column.
    pub fn cell(&self, i: usize, j: usize) -> Option<&LensData> {
        if i < self.grid_size && j < self.grid_size {
            self.cells.get(i * self.grid_size + j)
        } else {
            None
        }
    }

    /// Returns the bilinearly interpolated record. Inputs outside the table
    /// are clamped to its bounds.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    /// * `distance`   - Object distance in meters.
    pub fn query(&self, wavelength: Float, distance: Float) -> LensData {
        let (i, ti) = self.locate(self.wavelengths, wavelength);
        let (j, tj) = self.locate(self.distances, distance);
        let n = self.grid_size;
        let c = |i: usize, j: usize| self.cells[i * n + j];
        bilerp(tj, ti, c(i, j), c(i, j + 1), c(i + 1, j), c(i + 1, j + 1))
    }

    /// Returns the lower bin index and the fractional offset inside it.
    fn locate(&self, range: (Float, Float), x: Float) -> (usize, Float) {
        let (lo, hi) = range;
        let last = (self.grid_size - 1) as Float;
        let mut u = (clamp(x, lo, hi) - lo) / (hi - lo) * last;
        if !u.is_finite() {
            u = 0.0;
        }
        let nearest = u.round();
        if abs(u - nearest) < NODE_SNAP {
            u = nearest;
        }
        let i = min(u.floor() as usize, self.grid_size - 2);
        (i, u - i as Float)
    }
}

/// Returns node `i` of `n` uniform nodes spanning `range` inclusive.
fn node(range: (Float, Float), i: usize, n: usize) -> Float {
    if i + 1 == n {
        range.1
    } else {
        range.0 + (range.1 - range.0) * i as Float / (n - 1) as Float
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

    fn bits(ld: &LensData) -> Vec<u32> {
        [
            ld.b,
            ld.c,
            ld.d,
            ld.e,
            ld.f,
            ld.focal_length,
            ld.entrance_pupil,
            ld.exit_pupil,
            ld.entrance_pupil_radius,
            ld.exit_pupil_radius,
            ld.principal_plane_front,
            ld.principal_plane_rear,
            ld.s_prime,
        ]
        .iter()
        .map(|v| v.to_bits())
        .collect()
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = LensDataTable::build(&singlet(), 5, 0.2, 15.0).unwrap();
        assert_eq!(table.wavelength_range(), (0.36, 0.83));
        assert_eq!(table.distance_range(), (0.2, 15.0));
        assert_eq!(table.wavelength_at(0), 0.36);
        assert_eq!(table.wavelength_at(4), 0.83);
        assert_eq!(table.distance_at(0), 0.2);
        assert_eq!(table.distance_at(4), 15.0);
        assert!(approx_eq!(f32, table.distance_at(2), 7.6, epsilon = 1e-5));
        assert!(table.cell(4, 4).is_some());
        assert!(table.cell(5, 0).is_none());
        assert_eq!(table.replaced_values(), 0);
    }

    #[test]
    fn node_query_returns_cell() {
        let table = LensDataTable::build(&singlet(), 9, 0.2, 15.0).unwrap();
        for i in 0..9 {
            for j in 0..9 {
                let ld = table.query(table.wavelength_at(i), table.distance_at(j));
                assert_eq!(bits(&ld), bits(table.cell(i, j).unwrap()), "({i}, {j})");
            }
        }
    }

    #[test]
    fn query_interpolates_and_clamps() {
        let table = LensDataTable::build(&singlet(), 3, 1.0, 3.0).unwrap();
        let wl = table.wavelength_at(1);
        let a = table.cell(1, 0).unwrap();
        let b = table.cell(1, 1).unwrap();
        let mid = table.query(wl, 1.5);
        assert!(approx_eq!(f32, mid.s_prime, 0.5 * (a.s_prime + b.s_prime), epsilon = 1e-7));

        let below = table.query(0.1, 0.01);
        assert_eq!(bits(&below), bits(table.cell(0, 0).unwrap()));
        let above = table.query(2.0, 100.0);
        assert_eq!(bits(&above), bits(table.cell(2, 2).unwrap()));
    }

    #[test]
    fn builds_are_bit_identical() {
        let p = singlet();
        let a = LensDataTable::build(&p, 6, 0.2, 15.0).unwrap();
        let b = LensDataTable::build(&p, 6, 0.2, 15.0).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(bits(a.cell(i, j).unwrap()), bits(b.cell(i, j).unwrap()));
            }
        }
    }

    #[test]
    fn rows_share_pupils() {
        let table = LensDataTable::build(&singlet(), 4, 0.2, 15.0).unwrap();
        let first = table.cell(2, 0).unwrap();
        let last = table.cell(2, 3).unwrap();
        assert_eq!(first.entrance_pupil_radius, last.entrance_pupil_radius);
        assert_eq!(first.focal_length, last.focal_length);
        assert!(first.s_prime > last.s_prime);
    }

    #[test]
    fn invalid_arguments() {
        let p = singlet();
        assert!(LensDataTable::build(&p, 1, 0.2, 15.0).is_err());
        assert!(LensDataTable::build(&p, 8, 2.0, 1.0).is_err());
    }
}
