//! # Output Module
//!
//! Writes rendered frames to disk:
//! - PNG, 8-bit, with clamping and sRGB encoding
//! - EXR, linear f32, values stored unchanged
//!
//! The tracer itself never clamps. For colors and alphas in [0, 1] the
//! compositing weights sum to at most one, so frames are already in range;
//! the PNG writer clamps anyway so out-of-range scenes degrade to white.

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::error::{Error, Result};

/// Linear f32 RGB frame as produced by the renderer.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Encode one linear channel value as an 8-bit sRGB value.
///
/// Values are clamped to [0, 1] first.
pub fn linear_to_srgb8(linear: f32) -> u8 {
    let linear = linear.clamp(0.0, 1.0);
    let gamma = if linear <= 0.0031308 {
        // Linear portion for very dark values
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (gamma * 255.0).round() as u8
}

/// Convert a linear frame to 8-bit sRGB.
pub fn to_srgb8(image: &HdrImage) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            linear_to_srgb8(pixel[0]),
            linear_to_srgb8(pixel[1]),
            linear_to_srgb8(pixel[2]),
        ])
    })
}

/// Save a frame as PNG with clamping and sRGB encoding.
pub fn save_image_as_png(image: &HdrImage, output_path: &Path) -> Result<()> {
    to_srgb8(image).save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save a frame as EXR with full linear precision.
pub fn save_image_as_exr(image: &HdrImage, output_path: &Path) -> Result<()> {
    write_rgb_file(output_path, image.width() as usize, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Save a frame in the format named by the path's extension.
pub fn save_image(image: &HdrImage, output_path: &Path) -> Result<()> {
    let extension = output_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_image_as_png(image, output_path),
        "exr" => save_image_as_exr(image, output_path),
        _ => Err(Error::UnsupportedOutput(extension)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints_and_clamping() {
        assert_eq!(linear_to_srgb8(0.0), 0);
        assert_eq!(linear_to_srgb8(1.0), 255);
        assert_eq!(linear_to_srgb8(-3.0), 0);
        assert_eq!(linear_to_srgb8(7.5), 255);
    }

    #[test]
    fn srgb_brightens_midtones() {
        // 18% gray encodes to roughly 118
        let encoded = linear_to_srgb8(0.18);
        assert!((116..=120).contains(&encoded), "got {encoded}");
    }

    #[test]
    fn converts_whole_frame() {
        let image: HdrImage = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([1.0, 0.0, 2.0])
            } else {
                Rgb([0.0, 0.0, 0.0])
            }
        });
        let ldr = to_srgb8(&image);
        assert_eq!(ldr.get_pixel(0, 0), &Rgb([255, 0, 255]));
        assert_eq!(ldr.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn rejects_unknown_extension() {
        let image: HdrImage = ImageBuffer::new(1, 1);
        let err = save_image(&image, Path::new("frame.jpg")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOutput(ext) if ext == "jpg"));
    }

    #[test]
    fn writes_png_and_exr() {
        let dir = tempfile::tempdir().unwrap();
        let image: HdrImage = ImageBuffer::from_pixel(4, 3, Rgb([0.5, 0.25, 1.0]));

        let png = dir.path().join("frame.png");
        save_image(&image, &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(2, 1), &Rgb([188, 137, 255]));

        let exr = dir.path().join("frame.exr");
        save_image(&image, &exr).unwrap();
        assert!(exr.metadata().unwrap().len() > 0);
    }
}
