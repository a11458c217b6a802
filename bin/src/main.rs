#[macro_use]
extern crate log;

use clap::Parser;
use dof::*;
use dof_core::app::*;
use dof_core::image_io::*;
use dof_core::math::*;
use dof_core::spectrum::luminance;
use optics::*;

/// White point of the preview tone map.
const PREVIEW_WHITE: Float = 10.0;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    if let Err(e) = run(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    options.validate()?;

    // Lens.
    let import = import_lens_file(&options.lens, &builtin_catalog())?;
    if !import.is_supported() {
        if options.allow_unsupported {
            warn!("{} has unsupported surfaces; continuing", options.lens);
        } else {
            return Err(format!(
                "{} has unsupported surfaces; use --allow-unsupported to render anyway",
                options.lens
            ));
        }
    }

    let config = LensSystemConfig {
        focus_distance: options.focus,
        aperture_scale: options.aperture,
        grid_size: options.grid,
        sensor_width: options.sensor,
        ..Default::default()
    };
    let system = LensSystem::new(import.prescription, config)?;

    // Source image and depth.
    let image = read_image(&options.input)?;
    let source = match &options.depth {
        Some(path) => SourceImage::with_depth_map(&image, &read_image(path)?)?,
        None => SourceImage::from_rgba(&image)?,
    };
    let (width, height) = (source.width(), source.height());

    let sprite = match &options.sprite {
        Some(path) => {
            let (values, w, h) = read_grayscale(path)?;
            Some(ApertureSprite::from_grayscale(values, w, h).map_err(|e| format!("{path}: {e}"))?)
        }
        None => None,
    };

    let sampler_config = SamplerConfig {
        estimator: match options.estimator {
            EstimatorOption::Seidel => EstimatorKind::Seidel,
            EstimatorOption::Ssrt => EstimatorKind::RayTraced,
        },
        chromatic: !options.achromatic,
        aberrations: !options.no_aberrations,
        vignetting: options.vignetting,
        fixed_lens_data: options.fixed_lens_data,
        jitter: !options.no_jitter,
    };
    let sampler = DofSampler::new(&system, sampler_config, sprite.as_ref(), width, height)?;

    let render_config = RenderConfig {
        allocation: match options.allocation {
            AllocationOption::Uniform => SampleAllocation::Uniform {
                samples_per_pixel: options.samples,
            },
            AllocationOption::Adaptive => SampleAllocation::Adaptive {
                samples: options.samples,
            },
        },
        seed: options.seed,
        threads: options.threads(),
        quiet: options.quiet,
    };
    let renderer = Renderer::new(sampler, render_config);

    // Circle of confusion pass.
    let coc = if options.coc.is_some() || (options.smart && options.allocation == AllocationOption::Adaptive) {
        Some(renderer.coc_pass(&source)?)
    } else {
        None
    };
    if let (Some(path), Some(coc)) = (&options.coc, &coc) {
        write_image(path, &coc.to_rgba(), width, height)?;
    }
    let allocation_coc = if options.smart { coc.as_ref() } else { None };

    // Render.
    let accumulator = Accumulator::new(width, height);
    let stats = renderer.render(&source, &accumulator, allocation_coc)?;
    if stats.splatted == 0 {
        warn!("No samples reached the sensor");
    }

    let rgba = accumulator.resolve(options.exposure, !options.no_normalize);
    write_image(&options.output, &rgba, width, height)?;

    if let Some(path) = &options.preview {
        write_image(path, &tone_map(&rgba), width, height)?;
    }

    Ok(())
}

/// Extended Reinhard tone mapping on pixel luminance. Alpha is set to one.
fn tone_map(rgba: &[Float]) -> Vec<Float> {
    let white2 = PREVIEW_WHITE * PREVIEW_WHITE;
    rgba.chunks_exact(4)
        .flat_map(|p| {
            let rgb = [p[0], p[1], p[2]];
            let l = luminance(&rgb);
            let scale = if l > 0.0 {
                (1.0 + l / white2) / (1.0 + l)
            } else {
                0.0
            };
            [rgb[0] * scale, rgb[1] * scale, rgb[2] * scale, 1.0]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_map_compresses_highlights() {
        let out = tone_map(&[0.0, 0.0, 0.0, 5.0, 1.0, 1.0, 1.0, 2.0, 100.0, 100.0, 100.0, 1.0]);
        assert_eq!(&out[0..4], &[0.0, 0.0, 0.0, 1.0]);
        assert!(out[4] > 0.5 && out[4] < 1.0);
        assert!(out[8] > 1.0 && out[8] < 2.0);
        assert_eq!(out[11], 1.0);
    }
}
