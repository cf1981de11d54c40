//! Color-distance background removal.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{ImagingError, ImagingResult};

/// Outputs are downscaled so their width never exceeds this. A
/// performance ceiling for the per-pixel pass, not a quality feature.
const MAX_OUTPUT_WIDTH: u32 = 800;

/// Maximum RGB Euclidean distance from the sampled background color
/// still classified as background. A pixel at exactly this distance is
/// background (transparent); only strictly greater is kept.
const BACKGROUND_TOLERANCE: f64 = 40.0;

/// Remove the background from encoded image bytes.
///
/// The input format is sniffed from the bytes; PNG, JPEG, GIF and WEBP
/// are accepted. The output is always PNG — the one format of the four
/// that carries alpha reliably.
pub fn remove_background(input: &[u8]) -> ImagingResult<Vec<u8>> {
    let format = image::guess_format(input).map_err(|e| ImagingError::decode(e.to_string()))?;

    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP
    ) {
        return Err(ImagingError::UnsupportedFormat(format!("{format:?}")));
    }

    let decoded = image::load_from_memory_with_format(input, format)
        .map_err(|e| ImagingError::decode(e.to_string()))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ImagingError::decode("image has no pixels"));
    }

    let cut_out = cut_out_background(&decoded);
    encode_png(&cut_out)
}

/// Classify every pixel of `image` against the background color sampled
/// at (0, 0) and return a raster where background pixels are fully
/// transparent.
///
/// The input is downscaled first so width <= 800 px (aspect preserved).
pub fn cut_out_background(image: &DynamicImage) -> RgbaImage {
    let rgb = downscale(image);
    let (width, height) = rgb.dimensions();

    let sample = rgb.get_pixel(0, 0).0;
    debug!(
        "Background sample at (0,0): rgb({}, {}, {}), raster {}x{}",
        sample[0], sample[1], sample[2], width, height
    );

    let mut output = RgbaImage::new(width, height);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let alpha = if color_distance(pixel.0, sample) > BACKGROUND_TOLERANCE {
            255
        } else {
            0
        };
        output.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], alpha]));
    }

    output
}

/// Downscale to the width ceiling, preserving aspect ratio.
fn downscale(image: &DynamicImage) -> RgbImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    if width <= MAX_OUTPUT_WIDTH {
        return rgb;
    }

    let scale = f64::from(MAX_OUTPUT_WIDTH) / f64::from(width);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);

    image::imageops::resize(
        &rgb,
        MAX_OUTPUT_WIDTH,
        new_height,
        image::imageops::FilterType::Triangle,
    )
}

/// Euclidean distance between two RGB colors.
fn color_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    let dr = f64::from(a[0]) - f64::from(b[0]);
    let dg = f64::from(a[1]) - f64::from(b[1]);
    let db = f64::from(a[2]) - f64::from(b[2]);
    (dr * dr + dg * dg + db * db).sqrt()
}

fn encode_png(raster: &RgbaImage) -> ImagingResult<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(raster.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| ImagingError::encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn encode(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    /// 2x1 raster: background sample at (0,0), probe pixel at (1,0).
    fn probe_raster(probe: [u8; 3]) -> RgbImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb(probe));
        img
    }

    #[test]
    fn test_distance_exactly_at_tolerance_is_background() {
        // (40,0,0) vs (0,0,0): distance exactly 40
        let raster = probe_raster([40, 0, 0]);
        let out = cut_out_background(&DynamicImage::ImageRgb8(raster));
        assert_eq!(out.get_pixel(1, 0)[3], 0, "distance 40 must be transparent");
    }

    #[test]
    fn test_distance_just_over_tolerance_is_foreground() {
        // (41,0,0) vs (0,0,0): distance 41
        let raster = probe_raster([41, 0, 0]);
        let out = cut_out_background(&DynamicImage::ImageRgb8(raster));
        assert_eq!(out.get_pixel(1, 0)[3], 255, "distance 41 must be opaque");
    }

    #[test]
    fn test_sample_pixel_is_always_background() {
        let raster = probe_raster([200, 200, 200]);
        let out = cut_out_background(&DynamicImage::ImageRgb8(raster));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_output_always_has_alpha_and_is_png() {
        let raster = probe_raster([200, 10, 10]);
        let bytes = remove_background(&encode(&raster)).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn test_deterministic_output() {
        let mut raster = RgbImage::new(16, 16);
        for (x, y, pixel) in raster.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 16) as u8, (y * 16) as u8, 128]);
        }
        let input = encode(&raster);

        let first = remove_background(&input).unwrap();
        let second = remove_background(&input).unwrap();
        assert_eq!(first, second, "fallback path must be bit-identical across runs");
    }

    #[test]
    fn test_wide_images_are_downscaled() {
        let raster = RgbImage::from_pixel(1600, 400, Rgb([10, 20, 30]));
        let out = cut_out_background(&DynamicImage::ImageRgb8(raster));
        assert_eq!(out.width(), 800);
        assert_eq!(out.height(), 200);
    }

    #[test]
    fn test_narrow_images_keep_their_size() {
        let raster = RgbImage::from_pixel(320, 240, Rgb([10, 20, 30]));
        let out = cut_out_background(&DynamicImage::ImageRgb8(raster));
        assert_eq!(out.dimensions(), (320, 240));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = remove_background(b"not an image at all").unwrap_err();
        assert!(matches!(err, ImagingError::Decode(_)));
    }
}
