//! Application related stuff

use crate::math::Float;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

/// Sensor estimator selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EstimatorOption {
    /// Analytic estimate from Seidel aberration coefficients.
    Seidel,

    /// Explicit rays traced through the lens.
    Ssrt,
}

/// How samples are distributed over the source pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AllocationOption {
    /// Every lit pixel gets the same number of samples.
    Uniform,

    /// A total budget is spread according to luminance and blur size.
    Adaptive,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about = "Lens depth of field simulation.", long_about = None)]
pub struct Options {
    /// Lens prescription in Zemax format.
    #[clap(long, short = 'l', value_name = "FILE", help = "Lens prescription (.zmx).")]
    pub lens: String,

    /// Source image. EXR alpha holds depth in meters.
    #[clap(long, short = 'i', value_name = "FILE", help = "Source image (.exr, .pfm or 8-bit).")]
    pub input: String,

    /// Optional depth map. Overrides the alpha channel of the source image.
    #[clap(long, short = 'd', value_name = "FILE", help = "Depth map in meters (.pfm or .exr).")]
    pub depth: Option<String>,

    /// Path to the accumulated image.
    #[clap(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "dof.exr",
        help = "Write the final image to the given filename."
    )]
    pub output: String,

    /// Path to a tone mapped preview.
    #[clap(long, value_name = "FILE", help = "Write a tone mapped 8-bit preview.")]
    pub preview: Option<String>,

    /// Path to the circle of confusion map.
    #[clap(long, value_name = "FILE", help = "Write the circle of confusion map.")]
    pub coc: Option<String>,

    /// Samples per pixel (uniform) or total samples (adaptive).
    #[clap(
        long,
        short = 's',
        value_name = "NUM",
        default_value_t = 256,
        help = "Samples per lit pixel, or the total budget with adaptive allocation."
    )]
    pub samples: u64,

    /// Sample allocation mode.
    #[clap(long, value_enum, default_value_t = AllocationOption::Uniform)]
    pub allocation: AllocationOption,

    /// Focus distance in meters.
    #[clap(long, short = 'f', value_name = "METERS", default_value_t = 2.0)]
    pub focus: Float,

    /// Stop aperture scale in [0, 1].
    #[clap(long, short = 'a', value_name = "SCALE", default_value_t = 1.0)]
    pub aperture: Float,

    /// Exposure multiplier applied when resolving.
    #[clap(long, short = 'e', value_name = "FLOAT", default_value_t = 1.0)]
    pub exposure: Float,

    /// Sensor estimator.
    #[clap(long, value_enum, default_value_t = EstimatorOption::Seidel)]
    pub estimator: EstimatorOption,

    /// Sample a single wavelength.
    #[clap(long, help = "Disable chromatic sampling; use 550nm for every sample.")]
    pub achromatic: bool,

    /// Ignore Seidel aberrations.
    #[clap(long, help = "Ignore aberrations in the Seidel estimator.")]
    pub no_aberrations: bool,

    /// Clip samples against the first lens element.
    #[clap(long, help = "Enable optical vignetting against the front element.")]
    pub vignetting: bool,

    /// Aperture sprite in polar layout.
    #[clap(long, value_name = "FILE", help = "256x256 grayscale aperture sprite.")]
    pub sprite: Option<String>,

    /// Random seed.
    #[clap(long, value_name = "NUM", default_value_t = 1341)]
    pub seed: u32,

    /// Number of threads to use for rendering.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Lens data table size.
    #[clap(long, value_name = "NUM", default_value_t = 64, help = "Lens data grid size per axis.")]
    pub grid: usize,

    /// Sensor width in meters.
    #[clap(long, value_name = "METERS", default_value_t = 0.036)]
    pub sensor: Float,

    /// Use the mean lens data for every sample.
    #[clap(long, help = "Skip table queries; use the mean lens data everywhere.")]
    pub fixed_lens_data: bool,

    /// Run a circle of confusion pass to drive adaptive allocation.
    #[clap(long, help = "Allocate adaptive samples using a circle of confusion pass.")]
    pub smart: bool,

    /// Keep accumulated sums instead of dividing by the weight.
    #[clap(long, help = "Do not normalize output pixels by their accumulated weight.")]
    pub no_normalize: bool,

    /// Disable sub-pixel jitter.
    #[clap(long, help = "Sample pixel centers only.")]
    pub no_jitter: bool,

    /// Continue when the prescription has unsupported surfaces.
    #[clap(long, help = "Render even if the lens has unsupported surface types.")]
    pub allow_unsupported: bool,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads; using all {} logical CPUs", max_threads);
                max_threads
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Validates numeric ranges that clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.aperture) {
            return Err(format!("Aperture scale {} is outside [0, 1].", self.aperture));
        }
        if !(self.focus > 0.0) {
            return Err(format!("Focus distance {} must be positive.", self.focus));
        }
        if !(self.sensor > 0.0) {
            return Err(format!("Sensor width {} must be positive.", self.sensor));
        }
        if self.grid < 2 {
            return Err(format!("Grid size {} must be at least 2.", self.grid));
        }
        if self.samples == 0 {
            return Err("Sample count must be positive.".to_string());
        }
        Ok(())
    }
}

/// Create a progress bar for `len` units of work. The bar is hidden when
/// `quiet` is set.
///
/// * `len`   - Total units of work.
/// * `quiet` - Hide the progress bar.
pub fn create_progress_reporter(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    match ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg} (eta {eta})",
    ) {
        Ok(style) => progress.set_style(style.progress_chars("=>-")),
        Err(err) => warn!("Invalid progress template: {err}"),
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let mut all = vec!["lens-dof", "--lens", "a.zmx", "--input", "b.exr"];
        all.extend_from_slice(args);
        Options::parse_from(all)
    }

    #[test]
    fn defaults() {
        let options = parse(&[]);
        assert_eq!(options.output, "dof.exr");
        assert_eq!(options.samples, 256);
        assert_eq!(options.estimator, EstimatorOption::Seidel);
        assert_eq!(options.allocation, AllocationOption::Uniform);
        assert_eq!(options.seed, 1341);
        assert_eq!(options.grid, 64);
        assert!(!options.no_normalize);
        assert!(options.validate().is_ok());
        assert_eq!(options.threads(), 1);
    }

    #[test]
    fn value_enums_parse() {
        let options = parse(&["--estimator", "ssrt", "--allocation", "adaptive", "--smart"]);
        assert_eq!(options.estimator, EstimatorOption::Ssrt);
        assert_eq!(options.allocation, AllocationOption::Adaptive);
        assert!(options.smart);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse(&["--aperture", "1.5"]).validate().is_err());
        assert!(parse(&["--grid", "1"]).validate().is_err());
        assert!(parse(&["--focus=-1"]).validate().is_err());
    }

    #[test]
    fn hidden_progress_when_quiet() {
        let progress = create_progress_reporter(10, true);
        assert!(progress.is_hidden());
    }
}
