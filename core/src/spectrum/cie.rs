//! CIE 1931 color matching.

use super::cie_data::*;
use super::common::*;
use crate::math::*;
use std::sync::{Arc, OnceLock};

/// Maps a wavelength to CIE XYZ tristimulus values.
pub trait ColorMatching: Send + Sync {
    /// Returns the XYZ tristimulus values of a monochromatic stimulus.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    fn xyz(&self, wavelength: Float) -> [Float; 3];

    /// Returns the RGB value of a monochromatic stimulus.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    fn rgb(&self, wavelength: Float) -> [Float; 3] {
        xyz_to_rgb(&self.xyz(wavelength))
    }

    /// Returns the luminance (Y) of a monochromatic stimulus.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    fn luminance(&self, wavelength: Float) -> Float {
        self.xyz(wavelength)[1]
    }
}

/// Color matching functions given as sampled tables and linearly
/// interpolated.
#[derive(Clone, Debug)]
pub struct TabulatedColorMatching {
    /// Samples of x̄, ȳ and z̄ with wavelengths in micrometers.
    channels: [Vec<Sample>; 3],
}

impl TabulatedColorMatching {
    /// Create tabulated color matching functions.
    ///
    /// * `x` - Samples of x̄.
    /// * `y` - Samples of ȳ.
    /// * `z` - Samples of z̄.
    pub fn new(x: Vec<Sample>, y: Vec<Sample>, z: Vec<Sample>) -> Result<Self, String> {
        for (name, samples) in [("x", &x), ("y", &y), ("z", &z)] {
            if samples.is_empty() {
                return Err(format!("Color matching function {name} has no samples."));
            }
            if !are_spectrum_samples_sorted(samples) {
                return Err(format!("Color matching function {name} is not sorted by wavelength."));
            }
        }
        Ok(Self { channels: [x, y, z] })
    }

    /// Returns the CIE 1931 2° standard observer at 1 nm resolution.
    pub fn cie1931() -> Self {
        let mut channels: [Vec<Sample>; 3] = [
            Vec::with_capacity(CIE_SAMPLES),
            Vec::with_capacity(CIE_SAMPLES),
            Vec::with_capacity(CIE_SAMPLES),
        ];
        for (i, xyz) in CIE_XYZ.iter().enumerate() {
            let lambda = (CIE_LAMBDA_START + i) as Float / 1000.0;
            for c in 0..3 {
                channels[c].push(Sample::new(lambda, xyz[c]));
            }
        }
        Self { channels }
    }
}

impl ColorMatching for TabulatedColorMatching {
    fn xyz(&self, wavelength: Float) -> [Float; 3] {
        [
            interpolate_spectrum_samples(&self.channels[0], wavelength),
            interpolate_spectrum_samples(&self.channels[1], wavelength),
            interpolate_spectrum_samples(&self.channels[2], wavelength),
        ]
    }
}

/// The CIE 1931 2° standard observer. Interpolates the shared 1 nm table.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cie1931;

impl Cie1931 {
    /// Returns the shared table.
    fn table() -> &'static TabulatedColorMatching {
        static TABLE: OnceLock<TabulatedColorMatching> = OnceLock::new();
        TABLE.get_or_init(TabulatedColorMatching::cie1931)
    }
}

impl ColorMatching for Cie1931 {
    fn xyz(&self, wavelength: Float) -> [Float; 3] {
        Self::table().xyz(wavelength)
    }
}

/// Converts wavelengths to per-channel color weights. Each channel is scaled
/// so that its mean over the visible range is one, which keeps a uniformly
/// sampled spectrum neutral in expectation.
#[derive(Clone)]
pub struct SpectralColor {
    /// The color matching functions.
    matching: Arc<dyn ColorMatching>,

    /// Per-channel normalization.
    scale: [Float; 3],
}

impl SpectralColor {
    /// Number of integration steps across the visible range.
    const STEPS: usize = 471;

    /// Create a new `SpectralColor`.
    ///
    /// * `matching` - The color matching functions.
    pub fn new(matching: Arc<dyn ColorMatching>) -> Self {
        let mut sum = [0.0_f64; 3];
        for i in 0..Self::STEPS {
            let t = i as Float / (Self::STEPS - 1) as Float;
            let xyz = matching.xyz(lerp(t, VISIBLE_MIN_WAVELENGTH, VISIBLE_MAX_WAVELENGTH));
            for c in 0..3 {
                sum[c] += xyz[c] as f64;
            }
        }
        let scale = sum.map(|s| {
            let mean = s / Self::STEPS as f64;
            if mean > 0.0 {
                (1.0 / mean) as Float
            } else {
                0.0
            }
        });
        Self { matching, scale }
    }

    /// Returns the color weight of a wavelength.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    pub fn color(&self, wavelength: Float) -> [Float; 3] {
        let xyz = self.matching.xyz(wavelength);
        [xyz[0] * self.scale[0], xyz[1] * self.scale[1], xyz[2] * self.scale[2]]
    }

    /// Returns the underlying color matching functions.
    pub fn matching(&self) -> &dyn ColorMatching {
        self.matching.as_ref()
    }
}

impl Default for SpectralColor {
    fn default() -> Self {
        Self::new(Arc::new(Cie1931))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn table_nodes_are_exact() {
        let cmf = Cie1931;
        assert_eq!(cmf.xyz(0.360), CIE_XYZ[0]);
        assert_eq!(cmf.xyz(0.555)[1], 1.0);
        assert_eq!(cmf.xyz(0.830), CIE_XYZ[CIE_SAMPLES - 1]);
    }

    #[test]
    fn interpolates_between_nanometers() {
        let cmf = Cie1931;
        let a = cmf.xyz(0.550);
        let b = cmf.xyz(0.551);
        let mid = cmf.xyz(0.5505);
        for c in 0..3 {
            assert!(approx_eq!(f32, mid[c], 0.5 * (a[c] + b[c]), epsilon = 1e-5));
        }
    }

    #[test]
    fn outside_the_table_clamps() {
        let cmf = Cie1931;
        assert_eq!(cmf.xyz(0.300), cmf.xyz(0.360));
        assert_eq!(cmf.xyz(0.900), cmf.xyz(0.830));
    }

    #[test]
    fn peaks_at_known_wavelengths() {
        let cmf = Cie1931;
        assert!(cmf.luminance(0.555) > cmf.luminance(0.450));
        assert!(cmf.xyz(0.445)[2] > cmf.xyz(0.600)[2]);
        assert!(cmf.xyz(0.600)[0] > cmf.xyz(0.500)[0]);
        assert!(approx_eq!(f32, cmf.xyz(0.599)[0], 1.0629096, epsilon = 1e-6));
    }

    #[test]
    fn unsorted_tables_are_rejected() {
        let s = vec![Sample::new(0.5, 1.0), Sample::new(0.4, 1.0)];
        assert!(TabulatedColorMatching::new(s.clone(), s.clone(), s).is_err());
    }

    #[test]
    fn spectral_color_is_neutral_on_average() {
        let color = SpectralColor::default();
        let n = 4700;
        let mut sum = [0.0_f64; 3];
        for i in 0..n {
            let lambda = VISIBLE_MIN_WAVELENGTH
                + (i as Float + 0.5) / n as Float * (VISIBLE_MAX_WAVELENGTH - VISIBLE_MIN_WAVELENGTH);
            let c = color.color(lambda);
            for k in 0..3 {
                sum[k] += c[k] as f64;
            }
        }
        for s in sum {
            assert!((s / n as f64 - 1.0).abs() < 0.02, "mean {}", s / n as f64);
        }
    }
}
