use crate::suffixed_filename;
use color_eyre::eyre::{eyre, Result};
use fast_image_resize as fr;
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Dimensions of a width-bounded downscale, aspect ratio preserved.
/// `None` when the source is already at or under the target width.
#[must_use]
pub fn derived_dimensions(width: u32, height: u32, target_width: u32) -> Option<(u32, u32)> {
    if width <= target_width {
        return None;
    }
    let target_height =
        ((f64::from(height) * f64::from(target_width) / f64::from(width)).round() as u32).max(1);
    Some((target_width, target_height))
}

/// Downscale `img` to `target_width` and write it next to the original
/// with the derivative suffix. Sources at or under the target are not
/// re-encoded; the original filename is returned so the derivative
/// aliases the original file.
pub fn derive_photo_file(
    img: &DynamicImage,
    output_dir: &Path,
    original_filename: &str,
    suffix: &str,
    target_width: u32,
) -> Result<String> {
    let Some((dst_width, dst_height)) =
        derived_dimensions(img.width(), img.height(), target_width)
    else {
        return Ok(original_filename.to_owned());
    };

    let resized = resize_rgb(img, dst_width, dst_height)?;
    let derived_filename = suffixed_filename(original_filename, suffix);
    resized.save(output_dir.join(&derived_filename))?;

    Ok(derived_filename)
}

/// Resize to exact dimensions via `fast_image_resize` on an RGB8 buffer.
pub fn resize_rgb(img: &DynamicImage, dst_width: u32, dst_height: u32) -> Result<RgbImage> {
    let (src_width, src_height) = (img.width(), img.height());
    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgb8().into_raw(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| eyre!("Resize source error: {e}"))?;

    let mut dst_image = fr::images::Image::new(dst_width, dst_height, fr::PixelType::U8x3);
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, None)
        .map_err(|e| eyre!("Resizing failed: {e}"))?;

    RgbImage::from_raw(dst_width, dst_height, dst_image.into_vec())
        .ok_or_else(|| eyre!("Failed to construct resized image"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn solid_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([180, 90, 30])))
    }

    #[test]
    fn derived_dimensions_only_downscale() {
        assert_eq!(derived_dimensions(800, 800, 400), Some((400, 400)));
        assert_eq!(derived_dimensions(800, 600, 400), Some((400, 300)));
        assert_eq!(derived_dimensions(400, 800, 400), None);
        assert_eq!(derived_dimensions(200, 200, 400), None);
    }

    #[test]
    fn derived_dimensions_preserve_aspect_ratio() {
        let (w, h) = derived_dimensions(1600, 900, 400).unwrap();
        assert_eq!(w, 400);
        assert_eq!(h, 225);
        // Extreme panoramas still get at least one row of pixels.
        let (_, h) = derived_dimensions(10_000, 10, 400).unwrap();
        assert!(h >= 1);
    }

    #[test]
    fn square_source_yields_two_distinct_bounded_derivatives() {
        let dir = tempfile::tempdir().unwrap();
        let img = solid_image(800, 800);

        let small = derive_photo_file(&img, dir.path(), "photo.jpg", "_s", 200).unwrap();
        let medium = derive_photo_file(&img, dir.path(), "photo.jpg", "_m", 400).unwrap();

        assert_eq!(small, "photo_s.jpg");
        assert_eq!(medium, "photo_m.jpg");
        assert_ne!(small, medium);

        let small_img = image::open(dir.path().join(&small)).unwrap();
        let medium_img = image::open(dir.path().join(&medium)).unwrap();
        assert_eq!((small_img.width(), small_img.height()), (200, 200));
        assert_eq!((medium_img.width(), medium_img.height()), (400, 400));
    }

    #[test]
    fn small_source_reuses_original_file() {
        let dir = tempfile::tempdir().unwrap();
        let img = solid_image(300, 200);

        let name = derive_photo_file(&img, dir.path(), "photo.png", "_m", 400).unwrap();

        assert_eq!(name, "photo.png");
        assert!(!dir.path().join("photo_m.png").exists());
    }

    #[test]
    fn landscape_source_keeps_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let img = solid_image(1000, 500);

        let name = derive_photo_file(&img, dir.path(), "pano.png", "_s", 400).unwrap();

        let derived = image::open(dir.path().join(&name)).unwrap();
        assert_eq!((derived.width(), derived.height()), (400, 200));
    }
}
