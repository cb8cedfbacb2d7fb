//! Image preprocessing module for overlay assets
//!
//! Trims transparent padding rows and normalizes images to a uniform height.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Outcome, Pipeline, PreprocessingResult, StepTiming};
