//! Image I/O

use crate::math::*;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use exr::prelude as exrs;
use exr::prelude::*;
use image::*;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::result::Result;
use std::sync::OnceLock;

/// Stores RGBA image data.
#[derive(Clone, Debug, PartialEq)]
pub struct RGBAImage {
    /// The pixels in row-major order.
    pub pixels: Vec<[Float; 4]>,

    /// Width of image.
    pub width: usize,

    /// Height of image.
    pub height: usize,
}

impl RGBAImage {
    /// Creates a new `RGBAImage` from pixel data.
    ///
    /// * `pixels` - RGBA pixel data.
    /// * `width`  - Width of image.
    /// * `height` - Height of image.
    pub fn new(pixels: Vec<[Float; 4]>, width: usize, height: usize) -> Result<Self, String> {
        if width * height != pixels.len() {
            return Err(format!(
                "Image of {width} x {height} cannot hold {} pixels.",
                pixels.len()
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

/// Read an image. The alpha channel is 1 for formats without one.
///
/// * `path` - Input file path.
pub fn read_image(path: &str) -> Result<RGBAImage, String> {
    match get_extension_from_filename(path) {
        Some(".exr") => read_exr(path),
        Some(".pfm") => read_pfm(path),
        Some(_extension) => read_8_bit(path),
        None => Err(format!("Can't determine file type from suffix of filename {path}.")),
    }
}

/// Read a single layer OpenEXR file.
///
/// * `path` - Input file path.
fn read_exr(path: &str) -> Result<RGBAImage, String> {
    let reader = exrs::read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _channels| {
                let width = resolution.width();
                let height = resolution.height();
                RGBAImage {
                    pixels: vec![[0.0; 4]; width * height],
                    width,
                    height,
                }
            },
            |img, position, (r, g, b, a): (f32, f32, f32, f32)| {
                let offset = position.y() * img.width + position.x();
                img.pixels[offset] = [r, g, b, a];
            },
        )
        .first_valid_layer()
        .all_attributes();

    match reader.from_file(path) {
        Ok(image) => {
            let pixels = image.layer_data.channel_data.pixels;
            info!("Read EXR image {path} ({} x {})", pixels.width, pixels.height);
            Ok(pixels)
        }
        Err(err) => Err(format!("Error reading EXR image {path}: {err}")),
    }
}

/// Returns true if the character is a space, newline or tab.
///
/// * `c` - The character to check.
#[inline(always)]
fn is_white_space(c: char) -> bool {
    c == ' ' || c == '\n' || c == '\t' || c == '\r'
}

// Reads a "word" from the file; i.e. it keeps reading until whitespace is
// reached or maximum length is reached.
//
// * `reader` - Reader.
// * `len`    - Maximum number of bytes to read.
fn read_pfm_word<R: Read>(reader: &mut R, len: usize) -> Result<String, String> {
    let mut s = String::new();

    let mut c = reader.read_u8().map_err(|e| format!("read_pfm_word(): {e}"))?;
    while !is_white_space(c as char) {
        if s.len() >= len {
            return Err("read_pfm_word(): filled buffer before finding whitespace.".to_string());
        }
        s.push(c as char);
        c = reader.read_u8().map_err(|e| format!("read_pfm_word(): {e}"))?;
    }

    Ok(s)
}

/// Read a PFM (Portable FloatMap) file.
///
/// * `path` - Input file path.
fn read_pfm(path: &str) -> Result<RGBAImage, String> {
    let file = File::open(path).map_err(|e| format!("Error reading PFM file '{path}': {e}"))?;
    let mut reader = BufReader::new(file);

    // Read either "Pf" or "PF".
    let n_channels = match read_pfm_word(&mut reader, 2)?.as_str() {
        "Pf" => 1,
        "PF" => 3,
        s => return Err(format!("Invalid PFM type '{s}' in '{path}'")),
    };

    let width = read_pfm_word(&mut reader, 80)?
        .parse::<usize>()
        .map_err(|e| format!("Error parsing PFM width: {e}"))?;
    let height = read_pfm_word(&mut reader, 80)?
        .parse::<usize>()
        .map_err(|e| format!("Error parsing PFM height: {e}"))?;
    let scale = read_pfm_word(&mut reader, 80)?
        .parse::<f32>()
        .map_err(|e| format!("Error parsing PFM scale: {e}"))?;

    // Negative scale means little endian.
    let little_endian = scale < 0.0;
    let scale = scale.abs();

    // Rows are stored bottom to top.
    let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; width * height];
    for y in (0..height).rev() {
        for x in 0..width {
            let pixel = &mut pixels[y * width + x];
            for c in 0..n_channels {
                let f = if little_endian {
                    reader.read_f32::<LittleEndian>()
                } else {
                    reader.read_f32::<BigEndian>()
                }
                .map_err(|e| format!("Error reading PFM pixel data x={x}, y={y}: {e}"))?;
                pixel[c] = f * scale;
            }
            if n_channels == 1 {
                pixel[1] = pixel[0];
                pixel[2] = pixel[0];
            }
        }
    }

    info!("Read PFM image {path} ({width} x {height} x {n_channels})");

    RGBAImage::new(pixels, width, height)
}

/// Read an 8-bit image format.
///
/// * `path` - Input file path.
fn read_8_bit(path: &str) -> Result<RGBAImage, String> {
    let img: image::RgbaImage = match image::open(path) {
        Ok(i) => i.into_rgba8(),
        Err(err) => return Err(format!("Error reading image {path}: {err}")),
    };

    let width = img.width() as usize;
    let height = img.height() as usize;
    let pixels: Vec<[Float; 4]> = img
        .pixels()
        .map(|p| {
            [
                p[0] as Float / 255.0,
                p[1] as Float / 255.0,
                p[2] as Float / 255.0,
                p[3] as Float / 255.0,
            ]
        })
        .collect();

    info!("Read 8-bit image {path} ({width} x {height})");

    RGBAImage::new(pixels, width, height)
}

/// Read an 8-bit image and convert it to luma values.
///
/// * `path` - Input file path.
pub fn read_grayscale(path: &str) -> Result<(Vec<u8>, usize, usize), String> {
    let img = image::open(path)
        .map_err(|err| format!("Error reading image {path}: {err}"))?
        .into_luma8();
    let (width, height) = (img.width() as usize, img.height() as usize);

    info!("Read grayscale image {path} ({width} x {height})");

    Ok((img.into_raw(), width, height))
}

/// Write an RGBA image to the given path. 8-bit formats drop alpha and are
/// gamma corrected; PFM drops alpha.
///
/// * `path`   - Output file path.
/// * `rgba`   - Floating point RGBA pixel data.
/// * `width`  - Width of image.
/// * `height` - Height of image.
pub fn write_image(path: &str, rgba: &[Float], width: usize, height: usize) -> Result<(), String> {
    if rgba.len() != 4 * width * height {
        return Err(format!(
            "Image of {width} x {height} cannot be written from {} values.",
            rgba.len()
        ));
    }

    match get_extension_from_filename(path) {
        Some(".exr") => write_exr(path, rgba, width, height),
        Some(".png") => write_8_bit(path, rgba, width, height, ImageFormat::Png),
        Some(".tga") => write_8_bit(path, rgba, width, height, ImageFormat::Tga),
        Some(".pfm") => write_pfm(path, rgba, width, height),
        Some(extension) => Err(format!("Extension {extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Returns regular expression for extracting the file extension. This will
/// match the last occurrence of a period followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").expect("valid extension regex"))
}

/// Retrieve the lower case extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&'static str> {
    let ext = regex_file_ext().captures(path)?.get(1)?.as_str().to_lowercase();
    [".exr", ".pfm", ".png", ".tga", ".jpg", ".jpeg", ".bmp"]
        .into_iter()
        .find(|known| *known == ext)
        .or(Some(".unknown"))
}

/// Writes the image in OpenEXR format.
///
/// * `path`   - Output file path.
/// * `rgba`   - Floating point RGBA pixel data.
/// * `width`  - Width of image.
/// * `height` - Height of image.
fn write_exr(path: &str, rgba: &[Float], width: usize, height: usize) -> Result<(), String> {
    info!("Writing image {path} with resolution {width}x{height}");

    let size = Vec2(width, height);

    let layer = Layer::new(
        size,
        LayerAttributes::named("dof"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgba(|pos: Vec2<usize>| {
            let offset = 4 * (pos.1 * width + pos.0);
            (rgba[offset], rgba[offset + 1], rgba[offset + 2], rgba[offset + 3])
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match Image::empty(attributes).with_layer(layer).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgba`         - Floating point RGBA pixel data.
/// * `width`        - Width of image.
/// * `height`       - Height of image.
/// * `image_format` - Image format.
fn write_8_bit(
    path: &str,
    rgba: &[Float],
    width: usize,
    height: usize,
    image_format: ImageFormat,
) -> Result<(), String> {
    info!("Writing image {path} with resolution {width}x{height}");

    let mut imgbuf = ImageBuffer::new(width as u32, height as u32);
    for (i, (_x, _y, pixel)) in imgbuf.enumerate_pixels_mut().enumerate() {
        let offset = 4 * i;
        *pixel = image::Rgb(apply_gamma(&[rgba[offset], rgba[offset + 1], rgba[offset + 2]]));
    }

    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Writes the image in PFM (Portable FloatMap) format.
///
/// * `path`   - Output file path.
/// * `rgba`   - Floating point RGBA pixel data.
/// * `width`  - Width of image.
/// * `height` - Height of image.
fn write_pfm(path: &str, rgba: &[Float], width: usize, height: usize) -> Result<(), String> {
    info!("Writing image {path} with resolution {width}x{height}");

    let file = File::create(path).map_err(|e| format!("Error writing PFM file '{path}': {e}"))?;
    let mut writer = BufWriter::new(file);
    let big_endian = cfg!(target_endian = "big");
    let scale = if big_endian { 1.0 } else { -1.0 };

    let header = format!("PF\n{width} {height}\n{scale}\n");
    for b in header.bytes() {
        writer.write_u8(b).map_err(|e| format!("Error writing PFM header '{path}': {e}"))?;
    }

    // Rows are stored bottom to top.
    for y in (0..height).rev() {
        for x in 0..width {
            for c in 0..3 {
                let f = rgba[4 * (y * width + x) + c];
                if big_endian {
                    writer.write_f32::<BigEndian>(f)
                } else {
                    writer.write_f32::<LittleEndian>(f)
                }
                .map_err(|e| format!("Error writing PFM pixels '{path}': {e}"))?;
            }
        }
    }

    Ok(())
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_detected() {
        assert_eq!(get_extension_from_filename("a/b.EXR"), Some(".exr"));
        assert_eq!(get_extension_from_filename("x.pfm"), Some(".pfm"));
        assert_eq!(get_extension_from_filename("x.weird"), Some(".unknown"));
        assert_eq!(get_extension_from_filename("noext"), None);
    }

    #[test]
    fn gamma_clamps() {
        assert_eq!(clamp_byte(-1.0), 0);
        assert_eq!(clamp_byte(2.0), 255);
        assert_eq!(clamp_byte(1.0), 255);
    }

    #[test]
    fn pfm_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("dof_core_pfm_{}.pfm", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let rgba = vec![
            0.0, 0.5, 1.0, 1.0, //
            2.0, 3.0, 4.0, 1.0, //
            5.0, 6.0, 7.0, 1.0, //
            8.0, 9.0, 10.0, 1.0,
        ];
        write_image(&path, &rgba, 2, 2).unwrap();
        let img = read_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(img.pixels[1], [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(img.pixels[2], [5.0, 6.0, 7.0, 1.0]);
    }

    #[test]
    fn png_round_trip_is_gamma_encoded() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("dof_core_png_{}.png", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let rgba = vec![
            0.0, 0.0, 0.0, 1.0, //
            1.0, 1.0, 1.0, 1.0, //
            0.2, 0.2, 0.2, 1.0, //
            4.0, -1.0, 0.5, 1.0,
        ];
        write_image(&path, &rgba, 2, 2).unwrap();
        let img = read_image(&path).unwrap();
        let gray = read_grayscale(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(img.pixels[0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(img.pixels[1], [1.0, 1.0, 1.0, 1.0]);
        // sRGB encoding lifts mid tones.
        assert!(img.pixels[2][0] > 0.4);
        assert_eq!(img.pixels[3][0], 1.0);
        assert_eq!(img.pixels[3][1], 0.0);
        assert_eq!((gray.1, gray.2), (2, 2));
        assert_eq!(gray.0[0], 0);
        assert_eq!(gray.0[1], 255);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(write_image("x.exr", &[0.0; 3], 1, 1).is_err());
        assert!(RGBAImage::new(vec![[0.0; 4]; 3], 2, 2).is_err());
    }
}
