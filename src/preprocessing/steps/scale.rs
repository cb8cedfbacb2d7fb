use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Resampling filter for the height normalization
const FILTER: FilterType = FilterType::Lanczos3;

/// Width that preserves the source aspect ratio at `target_height`,
/// rounded to the nearest pixel and never below 1.
pub fn width_for_height(width: u32, height: u32, target_height: u32) -> u32 {
    if width == 0 || height == 0 {
        return 1;
    }
    let aspect = width as f64 / height as f64;
    ((target_height as f64 * aspect).round() as u32).max(1)
}

/// Rescale the image so its height is exactly `target_height`, with the
/// width following the aspect ratio.
pub fn apply(image: &DynamicImage, target_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let new_width = width_for_height(width, height, target_height);
    image.resize_exact(new_width, target_height, FILTER)
}
