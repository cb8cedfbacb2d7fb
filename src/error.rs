use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Failed to save image: {0}")]
    Save(String),

    #[error("Failed to scan folder: {0}")]
    FolderScan(String),

    #[error("Failed to read file metadata: {0}")]
    Metadata(String),

    #[error("Failed to read watermark file: {0}")]
    WatermarkRead(String),

    #[error("Failed to write watermark file: {0}")]
    WatermarkWrite(String),
}
