//! Renderer

use crate::accumulator::*;
use crate::coc::*;
use crate::image::*;
use crate::sampler::*;
use dof_core::app::create_progress_reporter;
use dof_core::math::*;
use dof_core::rng::{RNG, DEFAULT_SEED};
use itertools::Itertools;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Smallest circle of confusion, in squared pixels, used when weighing
/// pixels for adaptive allocation.
pub const MIN_ALLOCATION_COC: Float = 400.0;

/// How samples are distributed over the source pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SampleAllocation {
    /// Every pixel with non-zero luminance receives exactly this many
    /// samples of weight 1.
    Uniform { samples_per_pixel: u64 },

    /// A total budget spread in proportion to luminance times blur size.
    Adaptive { samples: u64 },
}

/// Renderer settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Sample allocation.
    pub allocation: SampleAllocation,

    /// Base seed; row `y` draws from `RNG::stream(seed, y)`.
    pub seed: u32,

    /// Number of worker threads.
    pub threads: usize,

    /// Hide progress reporting.
    pub quiet: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            allocation: SampleAllocation::Uniform { samples_per_pixel: 256 },
            seed: DEFAULT_SEED,
            threads: 1,
            quiet: true,
        }
    }
}

/// Sample counts of a render.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Samples drawn.
    pub samples: u64,

    /// Samples added to the accumulator.
    pub splatted: u64,

    /// Samples blocked by the first lens element.
    pub vignetted: u64,

    /// Samples the estimator rejected.
    pub invalid: u64,

    /// Samples landing outside the image.
    pub out_of_bounds: u64,
}

impl Add for RenderStats {
    type Output = RenderStats;

    fn add(self, other: Self) -> Self::Output {
        Self {
            samples: self.samples + other.samples,
            splatted: self.splatted + other.splatted,
            vignetted: self.vignetted + other.vignetted,
            invalid: self.invalid + other.invalid,
            out_of_bounds: self.out_of_bounds + other.out_of_bounds,
        }
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples: {} splatted, {} vignetted, {} invalid, {} out of bounds",
            self.samples, self.splatted, self.vignetted, self.invalid, self.out_of_bounds
        )
    }
}

/// Returns the sample count and per-sample weight for a pixel under
/// adaptive allocation. The fractional part of the expected count is
/// realized stochastically so the expected total weight of the pixel is one.
///
/// * `contribution` - Pixel contribution.
/// * `per_sample`   - Contribution represented by one sample.
/// * `u`            - Uniform random value in [0, 1).
pub fn adaptive_samples(contribution: Float, per_sample: Float, u: Float) -> (u64, Float) {
    let expected = contribution / per_sample;
    if !(expected.is_finite() && expected > 0.0) {
        return (0, 0.0);
    }
    let mut n = expected.floor() as u64;
    if expected - expected.floor() > u {
        n += 1;
    }
    if n == 0 {
        return (0, 0.0);
    }
    (n, 1.0 / n as Float * (1.0 / min(1.0, expected)))
}

/// Per-row sample allocation.
#[derive(Copy, Clone)]
enum Plan<'a> {
    Uniform(u64),
    Adaptive { per_sample: Float, coc: Option<&'a CocMap> },
}

/// Distributes samples over a source image and splats them into an
/// accumulator. Rows are rendered in parallel.
pub struct Renderer<'a> {
    sampler: DofSampler<'a>,
    config: RenderConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer.
    ///
    /// * `sampler` - The depth of field sampler.
    /// * `config`  - Renderer settings.
    pub fn new(sampler: DofSampler<'a>, config: RenderConfig) -> Self {
        Self { sampler, config }
    }

    /// Returns the sampler.
    pub fn sampler(&self) -> &DofSampler<'a> {
        &self.sampler
    }

    /// Returns the renderer settings.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn check_size(&self, what: &str, width: usize, height: usize) -> Result<(), String> {
        if width != self.sampler.width() || height != self.sampler.height() {
            return Err(format!(
                "{what} of {width} x {height} does not match the sampler's {} x {}.",
                self.sampler.width(),
                self.sampler.height()
            ));
        }
        Ok(())
    }

    fn threads(&self) -> usize {
        max(1, self.config.threads)
    }

    /// Computes the circle of confusion of every source pixel. Invalid
    /// samples leave zero.
    ///
    /// * `source` - The source image.
    pub fn coc_pass(&self, source: &SourceImage) -> Result<CocMap, String> {
        self.check_size("Source image", source.width(), source.height())?;
        let (width, height) = (source.width(), source.height());
        let threads = self.threads();

        let progress = create_progress_reporter(height as u64, self.config.quiet);
        progress.set_message("Circle of confusion");

        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<usize>(threads);

            for _ in 0..threads {
                let rxc = rx.clone();
                let result_tx = result_tx.clone();
                let progress = &progress;
                scope.spawn(move |_| {
                    for y in rxc.iter() {
                        let row: Vec<Float> = (0..width)
                            .map(|x| {
                                source
                                    .get(x, y)
                                    .and_then(|p| self.sampler.circle_of_confusion(x, y, p.depth))
                                    .unwrap_or(0.0)
                            })
                            .collect();
                        if result_tx.send((y, row)).is_err() {
                            break;
                        }
                        progress.inc(1);
                    }
                });
            }
            drop(rx);

            for y in 0..height {
                if tx.send(y).is_err() {
                    break;
                }
            }
        })
        .map_err(|_| "Circle of confusion worker panicked".to_string())?;
        drop(result_tx);

        let mut coc = CocMap::new(width, height);
        for (y, row) in result_rx.iter() {
            for (x, v) in row.into_iter().enumerate() {
                coc.set(x, y, v);
            }
        }
        progress.finish_with_message("Circle of confusion complete");

        debug!("Largest circle of confusion {} px^2", coc.max_value());
        Ok(coc)
    }

    /// Renders a source image into an accumulator.
    ///
    /// * `source`      - The source image.
    /// * `accumulator` - Output buffer; must match the source size.
    /// * `coc`         - Optional circle of confusion map for adaptive allocation.
    pub fn render(
        &self,
        source: &SourceImage,
        accumulator: &Accumulator,
        coc: Option<&CocMap>,
    ) -> Result<RenderStats, String> {
        self.check_size("Source image", source.width(), source.height())?;
        self.check_size("Accumulator", accumulator.width(), accumulator.height())?;
        if let Some(coc) = coc {
            self.check_size("CoC map", coc.width(), coc.height())?;
        }

        let plan = match self.config.allocation {
            SampleAllocation::Uniform { samples_per_pixel } => Plan::Uniform(samples_per_pixel),
            SampleAllocation::Adaptive { samples } => {
                let total: f64 = (0..source.height())
                    .cartesian_product(0..source.width())
                    .map(|(y, x)| contribution(source, coc, x, y) as f64)
                    .sum();
                if !(total > 0.0) || samples == 0 {
                    warn!("Source image has no light to distribute; nothing to render");
                    return Ok(RenderStats::default());
                }
                Plan::Adaptive {
                    per_sample: (total / samples as f64) as Float,
                    coc,
                }
            }
        };

        let height = source.height();
        let threads = self.threads();
        info!(
            "Rendering {}x{} pixels with {:?} on {} threads",
            source.width(),
            height,
            self.config.allocation,
            threads
        );

        let progress = create_progress_reporter(height as u64, self.config.quiet);
        progress.set_message("Rendering");

        let stats = crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<usize>(threads);

            let workers: Vec<_> = (0..threads)
                .map(|_| {
                    let rxc = rx.clone();
                    let progress = &progress;
                    scope.spawn(move |_| {
                        let mut stats = RenderStats::default();
                        for y in rxc.iter() {
                            stats += self.render_row(source, accumulator, y, plan);
                            progress.inc(1);
                        }
                        stats
                    })
                })
                .collect();
            drop(rx);

            for y in 0..height {
                if tx.send(y).is_err() {
                    break;
                }
            }
            drop(tx);

            workers
                .into_iter()
                .try_fold(RenderStats::default(), |total, worker| worker.join().map(|s| total + s))
        })
        .map_err(|_| "Render worker panicked".to_string())?
        .map_err(|_| "Render worker panicked".to_string())?;

        progress.finish_with_message("Render complete");
        info!("Rendered {}", stats);
        Ok(stats)
    }

    /// Renders one source row.
    fn render_row(&self, source: &SourceImage, accumulator: &Accumulator, y: usize, plan: Plan) -> RenderStats {
        let mut rng = RNG::stream(self.config.seed, y as u64);
        let sampling = self.sampler.pupil_sampling();
        let mut stats = RenderStats::default();

        for x in 0..source.width() {
            let pixel = match source.get(x, y) {
                Some(p) if p.luminance() > 0.0 => p,
                _ => continue,
            };

            let (n, weight) = match plan {
                Plan::Uniform(spp) => (spp, 1.0),
                Plan::Adaptive { per_sample, coc } => {
                    adaptive_samples(contribution(source, coc, x, y), per_sample, rng.uniform_float())
                }
            };

            for _ in 0..n {
                stats.samples += 1;
                let sample = self.sampler.draw(x, y, &mut rng, sampling);
                match self.sampler.trace(&sample, pixel.depth, sampling) {
                    Ok(hit) => {
                        let rgb = [
                            pixel.rgb[0] * hit.color[0],
                            pixel.rgb[1] * hit.color[1],
                            pixel.rgb[2] * hit.color[2],
                        ];
                        if accumulator.add(hit.x, hit.y, rgb, weight) {
                            stats.splatted += 1;
                        } else {
                            stats.out_of_bounds += 1;
                        }
                    }
                    Err(SampleFailure::Vignetted) => stats.vignetted += 1,
                    Err(SampleFailure::Invalid) => stats.invalid += 1,
                }
            }
        }

        debug!("Row {} done: {}", y, stats);
        stats
    }
}

/// Returns `max(MIN_ALLOCATION_COC, coc) * luminance` for a source pixel.
fn contribution(source: &SourceImage, coc: Option<&CocMap>, x: usize, y: usize) -> Float {
    let luminance = source.get(x, y).map_or(0.0, |p| p.luminance());
    let coc = coc.and_then(|c| c.get(x, y)).unwrap_or(0.0);
    max(MIN_ALLOCATION_COC, coc) * luminance
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use optics::*;
    use proptest::prelude::*;

    fn system() -> LensSystem {
        let prescription = import_lens_str(include_str!("../../lenses/biconvex50.zmx"), &GlassCatalog::builtin())
            .unwrap()
            .prescription;
        let config = LensSystemConfig {
            grid_size: 8,
            ..Default::default()
        };
        LensSystem::new(prescription, config).unwrap()
    }

    fn source(width: usize, height: usize, depth: Float) -> SourceImage {
        let mut pixels = vec![SourcePixel { rgb: [0.0; 3], depth }; width * height];
        pixels[(height / 2) * width + width / 2].rgb = [1.0; 3];
        pixels[0].rgb = [0.5, 0.25, 0.125];
        SourceImage::new(pixels, width, height).unwrap()
    }

    #[test]
    fn adaptive_sample_counts() {
        assert_eq!(adaptive_samples(0.0, 1.0, 0.5), (0, 0.0));
        assert_eq!(adaptive_samples(1.0, 0.0, 0.5), (0, 0.0));

        let (n, w) = adaptive_samples(3.0, 1.0, 0.5);
        assert_eq!(n, 3);
        assert!(approx_eq!(f32, w, 1.0 / 3.0, ulps = 2));

        // Fractional part is realized when it exceeds the random value.
        assert_eq!(adaptive_samples(2.25, 1.0, 0.2).0, 3);
        assert_eq!(adaptive_samples(2.25, 1.0, 0.3).0, 2);

        // Below one expected sample the weight compensates the probability.
        let (n, w) = adaptive_samples(0.25, 1.0, 0.1);
        assert_eq!(n, 1);
        assert!(approx_eq!(f32, w, 4.0, ulps = 2));
        assert_eq!(adaptive_samples(0.25, 1.0, 0.3), (0, 0.0));
    }

    proptest! {
        #[test]
        fn adaptive_weight_is_one_in_expectation(expected in 1.0..50.0f32) {
            let (lo, w_lo) = adaptive_samples(expected, 1.0, 0.999);
            let (hi, w_hi) = adaptive_samples(expected, 1.0, 0.0);
            prop_assert!(hi >= lo && hi - lo <= 1);
            prop_assert!(approx_eq!(f32, lo as Float * w_lo, 1.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, hi as Float * w_hi, 1.0, epsilon = 1e-5));
        }
    }

    #[test]
    fn uniform_budget_is_exact() {
        let system = system();
        let config = SamplerConfig {
            chromatic: false,
            ..Default::default()
        };
        let sampler = DofSampler::new(&system, config, None, 9, 9).unwrap();
        let renderer = Renderer::new(
            sampler,
            RenderConfig {
                allocation: SampleAllocation::Uniform { samples_per_pixel: 100 },
                threads: 2,
                ..Default::default()
            },
        );
        let source = source(9, 9, system.seidel_focus());
        let acc = Accumulator::new(9, 9);
        let stats = renderer.render(&source, &acc, None).unwrap();

        // Two lit pixels.
        assert_eq!(stats.samples, 200);
        assert_eq!(
            stats.samples,
            stats.splatted + stats.vignetted + stats.invalid + stats.out_of_bounds
        );
        assert_eq!(acc.total_weight(), stats.splatted as f64);
    }

    #[test]
    fn renders_are_repeatable() {
        let system = system();
        let render = |threads| {
            let sampler = DofSampler::new(&system, SamplerConfig::default(), None, 9, 9).unwrap();
            let renderer = Renderer::new(
                sampler,
                RenderConfig {
                    allocation: SampleAllocation::Uniform { samples_per_pixel: 50 },
                    threads,
                    ..Default::default()
                },
            );
            let acc = Accumulator::new(9, 9);
            let stats = renderer.render(&source(9, 9, 1.0), &acc, None).unwrap();
            (stats, acc.resolve(1.0, false))
        };
        let (a, image_a) = render(1);
        let (b, image_b) = render(3);
        assert_eq!(a, b);
        for (x, y) in image_a.iter().zip(image_b.iter()) {
            assert!(approx_eq!(f32, *x, *y, epsilon = 1e-4));
        }
    }

    #[test]
    fn adaptive_spends_budget_on_bright_pixels() {
        let system = system();
        let sampler = DofSampler::new(&system, SamplerConfig::default(), None, 9, 9).unwrap();
        let renderer = Renderer::new(
            sampler,
            RenderConfig {
                allocation: SampleAllocation::Adaptive { samples: 1000 },
                threads: 2,
                ..Default::default()
            },
        );
        let source = source(9, 9, 3.0);
        let acc = Accumulator::new(9, 9);
        let stats = renderer.render(&source, &acc, None).unwrap();
        assert!(stats.samples >= 999 && stats.samples <= 1001, "{}", stats.samples);

        let black = SourceImage::new(vec![SourcePixel { rgb: [0.0; 3], depth: 1.0 }; 81], 9, 9).unwrap();
        assert_eq!(renderer.render(&black, &acc, None).unwrap(), RenderStats::default());
    }

    #[test]
    fn coc_pass_grows_with_defocus() {
        let system = system();
        let config = SamplerConfig {
            chromatic: false,
            ..Default::default()
        };
        let sampler = DofSampler::new(&system, config, None, 256, 256).unwrap();
        let renderer = Renderer::new(
            sampler,
            RenderConfig {
                threads: 4,
                ..Default::default()
            },
        );

        let focused = renderer.coc_pass(&source(256, 256, system.seidel_focus())).unwrap();
        let near = renderer.coc_pass(&source(256, 256, 0.2)).unwrap();
        assert_eq!(focused.get(128, 128), Some(0.0));
        assert!(near.get(128, 128).unwrap() > 0.0);

        // Off-axis pixels carry a projection offset that grows towards the
        // corners at any depth, so only the central window tracks defocus.
        let window = |map: &CocMap| {
            let mut sum = 0.0;
            for y in 126..=130 {
                for x in 126..=130 {
                    sum += map.get(x, y).unwrap();
                }
            }
            sum / 25.0
        };
        assert!(window(&near) > window(&focused));
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let system = system();
        let sampler = DofSampler::new(&system, SamplerConfig::default(), None, 9, 9).unwrap();
        let renderer = Renderer::new(sampler, RenderConfig::default());
        let acc = Accumulator::new(8, 9);
        assert!(renderer.render(&source(9, 9, 2.0), &acc, None).is_err());
        assert!(renderer.coc_pass(&source(4, 4, 2.0)).is_err());
    }
}
