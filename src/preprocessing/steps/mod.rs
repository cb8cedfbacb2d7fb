//! Individual preprocessing steps

pub mod scale;
pub mod trim;
