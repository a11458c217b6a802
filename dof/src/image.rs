//! Source image

use dof_core::image_io::*;
use dof_core::math::*;
use dof_core::spectrum::luminance;

/// Largest color value accepted from a source image.
pub const MAX_SOURCE_VALUE: Float = 1e6;

/// A source pixel: linear RGB and the distance of the surface it shows.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SourcePixel {
    /// Linear RGB.
    pub rgb: [Float; 3],

    /// Distance from the camera in meters.
    pub depth: Float,
}

impl SourcePixel {
    /// Returns the luminance of the pixel color.
    pub fn luminance(&self) -> Float {
        luminance(&self.rgb)
    }
}

/// The image depth of field is applied to.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    pixels: Vec<SourcePixel>,
    width: usize,
    height: usize,
}

impl SourceImage {
    /// Create a source image. Colors are clamped to `[0, MAX_SOURCE_VALUE]`.
    ///
    /// * `pixels` - Row-major pixels.
    /// * `width`  - Width of image.
    /// * `height` - Height of image.
    pub fn new(pixels: Vec<SourcePixel>, width: usize, height: usize) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!("Source image of {width} x {height} is empty."));
        }
        if width * height != pixels.len() {
            return Err(format!(
                "Source image of {width} x {height} cannot hold {} pixels.",
                pixels.len()
            ));
        }

        let pixels = pixels
            .into_iter()
            .map(|p| SourcePixel {
                rgb: p.rgb.map(clamp_color),
                depth: p.depth,
            })
            .collect();

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Create a source image whose depth is stored in the alpha channel.
    ///
    /// * `image` - RGBA image.
    pub fn from_rgba(image: &RGBAImage) -> Result<Self, String> {
        let pixels = image
            .pixels
            .iter()
            .map(|p| SourcePixel {
                rgb: [p[0], p[1], p[2]],
                depth: p[3],
            })
            .collect();
        Self::new(pixels, image.width, image.height)
    }

    /// Create a source image with a separate depth map. The first channel of
    /// the depth map is used.
    ///
    /// * `image` - RGB(A) image; alpha is ignored.
    /// * `depth` - Depth map of the same size.
    pub fn with_depth_map(image: &RGBAImage, depth: &RGBAImage) -> Result<Self, String> {
        if image.width != depth.width || image.height != depth.height {
            return Err(format!(
                "Depth map of {} x {} does not match image of {} x {}.",
                depth.width, depth.height, image.width, image.height
            ));
        }
        let pixels = image
            .pixels
            .iter()
            .zip(depth.pixels.iter())
            .map(|(p, d)| SourcePixel {
                rgb: [p[0], p[1], p[2]],
                depth: d[0],
            })
            .collect();
        Self::new(pixels, image.width, image.height)
    }

    /// Returns the width of the image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the image.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)` or `None` if out of bounds.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get(&self, x: usize, y: usize) -> Option<&SourcePixel> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Returns all pixels in row-major order.
    pub fn pixels(&self) -> &[SourcePixel] {
        &self.pixels
    }
}

fn clamp_color(v: Float) -> Float {
    if v.is_nan() {
        0.0
    } else {
        clamp(v, 0.0, MAX_SOURCE_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_clamped() {
        let image = RGBAImage::new(vec![[-1.0, 2e6, Float::NAN, 3.0], [0.5, 0.25, 1.0, 4.0]], 2, 1).unwrap();
        let source = SourceImage::from_rgba(&image).unwrap();
        let p = source.get(0, 0).unwrap();
        assert_eq!(p.rgb, [0.0, MAX_SOURCE_VALUE, 0.0]);
        assert_eq!(p.depth, 3.0);
        assert_eq!(source.get(1, 0).unwrap().rgb, [0.5, 0.25, 1.0]);
        assert!(source.get(2, 0).is_none());
        assert!(source.get(0, 1).is_none());
    }

    #[test]
    fn depth_map_overrides_alpha() {
        let image = RGBAImage::new(vec![[1.0, 1.0, 1.0, 1.0]; 4], 2, 2).unwrap();
        let depth = RGBAImage::new(vec![[5.0, 0.0, 0.0, 1.0]; 4], 2, 2).unwrap();
        let source = SourceImage::with_depth_map(&image, &depth).unwrap();
        assert!(source.pixels().iter().all(|p| p.depth == 5.0));

        let small = RGBAImage::new(vec![[5.0, 0.0, 0.0, 1.0]], 1, 1).unwrap();
        assert!(SourceImage::with_depth_map(&image, &small).is_err());
    }

    #[test]
    fn size_mismatch_is_rejected() {
        assert!(SourceImage::new(vec![SourcePixel::default(); 3], 2, 2).is_err());
        assert!(SourceImage::new(vec![], 0, 0).is_err());
    }
}
