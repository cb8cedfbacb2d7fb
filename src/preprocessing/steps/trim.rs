use image::{DynamicImage, RgbaImage};

/// Inclusive band of rows holding non-transparent content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row with at least one pixel of non-zero alpha.
    pub top: u32,
    /// Last row with at least one pixel of non-zero alpha.
    pub bottom: u32,
}

impl RowBand {
    /// Number of rows in the band, counting both endpoints.
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Scan the rows of `image` for non-zero alpha.
/// Returns `None` when every pixel is fully transparent.
pub fn alpha_bounds(image: &RgbaImage) -> Option<RowBand> {
    let (width, height) = image.dimensions();
    let mut top: Option<u32> = None;
    let mut bottom: Option<u32> = None;

    for y in 0..height {
        let has_content = (0..width).any(|x| image.get_pixel(x, y).0[3] > 0);
        if has_content {
            if top.is_none() {
                top = Some(y);
            }
            bottom = Some(y);
        }
    }

    match (top, bottom) {
        (Some(top), Some(bottom)) => Some(RowBand { top, bottom }),
        _ => None,
    }
}

/// Crop fully transparent rows off the top and bottom of the image,
/// keeping the full width. Returns `None` when the image has no visible
/// content at all, leaving the caller to decide what to do with it.
pub fn apply(image: &DynamicImage) -> Option<DynamicImage> {
    let rgba = image.to_rgba8();
    let band = alpha_bounds(&rgba)?;
    Some(image.crop_imm(0, band.top, rgba.width(), band.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    fn transparent(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
    }

    fn fill_rows(image: &mut RgbaImage, rows: std::ops::Range<u32>) {
        for y in rows {
            for x in 0..image.width() {
                image.put_pixel(x, y, Rgba([180, 90, 40, 255]));
            }
        }
    }

    #[test]
    fn test_opaque_image_spans_all_rows() {
        let img = RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 255]));
        let band = alpha_bounds(&img).unwrap();
        assert_eq!(band, RowBand { top: 0, bottom: 5 });
        assert_eq!(band.height(), 6);
    }

    #[test]
    fn test_bounds_find_content_band() {
        let mut img = transparent(10, 20);
        fill_rows(&mut img, 5..15);
        let band = alpha_bounds(&img).unwrap();
        assert_eq!(band, RowBand { top: 5, bottom: 14 });
        assert_eq!(band.height(), 10);
    }

    #[test]
    fn test_single_faint_pixel_counts_as_content() {
        // Alpha 1 is content; only alpha 0 is transparent
        let mut img = transparent(10, 10);
        img.put_pixel(7, 4, Rgba([0, 0, 0, 1]));
        let band = alpha_bounds(&img).unwrap();
        assert_eq!(band, RowBand { top: 4, bottom: 4 });
        assert_eq!(band.height(), 1);
    }

    #[test]
    fn test_content_touching_bottom_edge_is_kept() {
        let mut img = transparent(4, 9);
        fill_rows(&mut img, 6..9);
        let band = alpha_bounds(&img).unwrap();
        assert_eq!(band, RowBand { top: 6, bottom: 8 });
    }

    #[test]
    fn test_fully_transparent_has_no_bounds() {
        assert_eq!(alpha_bounds(&transparent(16, 16)), None);
    }

    #[test]
    fn test_apply_trims_margins_and_keeps_width() {
        let mut img = transparent(12, 30);
        fill_rows(&mut img, 10..21);
        let trimmed = apply(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(trimmed.dimensions(), (12, 11));

        // Border rows of the crop must hold content, not padding
        let rgba = trimmed.to_rgba8();
        let bottom = rgba.height() - 1;
        assert!((0..rgba.width()).any(|x| rgba.get_pixel(x, 0).0[3] > 0));
        assert!((0..rgba.width()).any(|x| rgba.get_pixel(x, bottom).0[3] > 0));
    }

    #[test]
    fn test_apply_without_margins_is_identity_sized() {
        let img = RgbaImage::from_pixel(5, 7, Rgba([1, 2, 3, 255]));
        let trimmed = apply(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(trimmed.dimensions(), (5, 7));
    }

    #[test]
    fn test_apply_treats_rgb_input_as_opaque() {
        // Images without an alpha channel convert to alpha 255 everywhere
        let img = image::RgbImage::from_pixel(6, 4, image::Rgb([9, 9, 9]));
        let trimmed = apply(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(trimmed.dimensions(), (6, 4));
    }

    #[test]
    fn test_apply_returns_none_for_fully_transparent() {
        let img = transparent(3, 3);
        assert!(apply(&DynamicImage::ImageRgba8(img)).is_none());
    }
}
