//! Common.

use crate::math::*;

/// Shortest visible wavelength in micrometers.
pub const VISIBLE_MIN_WAVELENGTH: Float = 0.360;

/// Longest visible wavelength in micrometers.
pub const VISIBLE_MAX_WAVELENGTH: Float = 0.830;

/// Wavelength in micrometers used by achromatic computations.
pub const REFERENCE_WAVELENGTH: Float = 0.550;

/// Weights used to compute the luminance of an RGB pixel.
pub const LUMINANCE_WEIGHTS: [Float; 3] = [0.27, 0.67, 0.06];

/// Stores a spectrum sample value at a given wavelenght.
#[derive(Copy, Clone, Default, Debug, PartialEq, PartialOrd)]
pub struct Sample {
    /// The wavelength.
    pub lambda: Float,

    /// The sample value.
    pub value: Float,
}

impl Sample {
    /// Create a new `Sample`.
    ///
    /// * `lambda` - The wavelength.
    /// * `value`  - The sample value.
    pub fn new(lambda: Float, value: Float) -> Self {
        Self { lambda, value }
    }
}

/// Determines if given samples are sorted by wavelength.
///
/// * `samples` - The samples.
pub fn are_spectrum_samples_sorted(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].lambda <= w[1].lambda)
}

/// Returns the value at a given wavelength by linearly interpolating between
/// the two samples that bracket it. Values outside the sampled range are
/// clamped to the end samples.
///
/// * `samples` - The sample values; sorted and non-empty.
/// * `l`       - Wavelength at which to interpolate.
pub fn interpolate_spectrum_samples(samples: &[Sample], l: Float) -> Float {
    let n = samples.len();

    if l <= samples[0].lambda {
        return samples[0].value;
    }
    if l >= samples[n - 1].lambda {
        return samples[n - 1].value;
    }

    let offset = find_interval(n, |index| samples[index].lambda <= l);
    let t = (l - samples[offset].lambda) / (samples[offset + 1].lambda - samples[offset].lambda);
    lerp(t, samples[offset].value, samples[offset + 1].value)
}

/// Converts the given XYZ coefficients to RGB coefficients using RGB spectra
/// defined for high-definition TVs.
///
/// * `xyz` - The XYZ coefficients.
#[rustfmt::skip]
pub fn xyz_to_rgb(xyz: &[Float; 3]) -> [Float; 3] {
    [
         3.240479 * xyz[0] - 1.537150 * xyz[1] - 0.498535 * xyz[2],
        -0.969256 * xyz[0] + 1.875991 * xyz[1] + 0.041556 * xyz[2],
         0.055648 * xyz[0] - 0.204043 * xyz[1] + 1.057311 * xyz[2],
    ]
}

/// Converts the given RGB coefficients to XYZ coefficients using RGB spectra
/// defined for high-definition TVs.
///
/// * `rgb` - The RGB coefficients.
#[rustfmt::skip]
pub fn rgb_to_xyz(rgb: &[Float; 3]) -> [Float; 3] {
    [
        0.412453 * rgb[0] + 0.357580 * rgb[1] + 0.180423 * rgb[2],
        0.212671 * rgb[0] + 0.715160 * rgb[1] + 0.072169 * rgb[2],
        0.019334 * rgb[0] + 0.119193 * rgb[1] + 0.950227 * rgb[2],
    ]
}

/// Returns the luminance of an RGB pixel.
///
/// * `rgb` - The RGB value.
#[inline]
pub fn luminance(rgb: &[Float; 3]) -> Float {
    rgb[0] * LUMINANCE_WEIGHTS[0] + rgb[1] * LUMINANCE_WEIGHTS[1] + rgb[2] * LUMINANCE_WEIGHTS[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn interpolate_between_samples() {
        let s = [Sample::new(400.0, 0.0), Sample::new(500.0, 1.0), Sample::new(600.0, 3.0)];
        assert!(are_spectrum_samples_sorted(&s));
        assert_eq!(interpolate_spectrum_samples(&s, 300.0), 0.0);
        assert_eq!(interpolate_spectrum_samples(&s, 700.0), 3.0);
        assert!(approx_eq!(f32, interpolate_spectrum_samples(&s, 550.0), 2.0, epsilon = 0.00001));
    }

    #[test]
    fn rgb_xyz_round_trip() {
        let rgb = [0.2, 0.5, 0.9];
        let back = xyz_to_rgb(&rgb_to_xyz(&rgb));
        for c in 0..3 {
            assert!(approx_eq!(f32, back[c], rgb[c], epsilon = 0.001));
        }
    }

    #[test]
    fn white_has_unit_luminance() {
        assert!(approx_eq!(f32, luminance(&[1.0, 1.0, 1.0]), 1.0, epsilon = 0.00001));
    }
}
