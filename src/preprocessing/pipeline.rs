use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// How the pipeline handled an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Transparent rows trimmed, then rescaled to the target height
    Scaled,
    /// No pixel with non-zero alpha; the image came back unchanged
    FullyTransparent,
}

impl Outcome {
    /// Get the outcome name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scaled => "scaled",
            Self::FullyTransparent => "fully_transparent",
        }
    }
}

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingResult {
    /// Preprocessed image (not serialized)
    #[serde(skip)]
    pub image: DynamicImage,
    /// What the pipeline did with the image
    pub outcome: Outcome,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Two-step pipeline: trim transparent rows, then rescale to a fixed height
pub struct Pipeline {
    target_height: u32,
}

impl Pipeline {
    pub fn new(target_height: u32) -> Self {
        Self { target_height }
    }

    /// Process a decoded image.
    ///
    /// A fully transparent image short-circuits and comes back unchanged;
    /// anything with visible content is cropped to its alpha bounds and
    /// rescaled so its height matches the configured target.
    pub fn process(&self, image: DynamicImage) -> PreprocessingResult {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let step_start = Instant::now();
        let trimmed = match steps::trim::apply(&image) {
            Some(trimmed) => trimmed,
            None => {
                return PreprocessingResult {
                    image,
                    outcome: Outcome::FullyTransparent,
                    total_time_ms: start.elapsed().as_millis() as u64,
                    steps: vec![],
                };
            }
        };
        steps_timing.push(StepTiming {
            name: "trim".to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });

        let step_start = Instant::now();
        let scaled = steps::scale::apply(&trimmed, self.target_height);
        steps_timing.push(StepTiming {
            name: "scale".to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });

        PreprocessingResult {
            image: scaled,
            outcome: Outcome::Scaled,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn overlay(width: u32, height: u32, content_rows: std::ops::Range<u32>) -> DynamicImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        for y in content_rows {
            for x in 0..width {
                img.put_pixel(x, y, Rgba([200, 100, 50, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_process_normalizes_height() {
        let pipeline = Pipeline::new(200);
        let result = pipeline.process(overlay(100, 50, 0..50));
        assert_eq!(result.outcome, Outcome::Scaled);
        // 2:1 aspect at height 200
        assert_eq!(result.image.dimensions(), (400, 200));
    }

    #[test]
    fn test_process_trims_before_scaling() {
        // 10 wide with a 10-row content band: square once trimmed
        let pipeline = Pipeline::new(30);
        let result = pipeline.process(overlay(10, 20, 5..15));
        assert_eq!(result.outcome, Outcome::Scaled);
        assert_eq!(result.image.dimensions(), (30, 30));
    }

    #[test]
    fn test_process_records_step_timings() {
        let result = Pipeline::new(100).process(overlay(10, 10, 0..10));
        let names: Vec<&str> = result.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["trim", "scale"]);
    }

    #[test]
    fn test_fully_transparent_comes_back_unchanged() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0])));
        let result = Pipeline::new(500).process(img.clone());
        assert_eq!(result.outcome, Outcome::FullyTransparent);
        assert_eq!(result.image.dimensions(), (8, 8));
        assert_eq!(result.image.to_rgba8().as_raw(), img.to_rgba8().as_raw());
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_thin_content_stays_at_least_one_pixel_wide() {
        // A 1px strip shrunk to height 5 would round its width to 0
        let pipeline = Pipeline::new(5);
        let result = pipeline.process(overlay(1, 100, 0..100));
        assert_eq!(result.image.dimensions(), (1, 5));
    }
}
