use crate::Args;
use std::path::PathBuf;

/// Preprocessor configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub folder: PathBuf,
    pub target_height: u32,
    pub watermark_file: PathBuf,
    pub json: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            folder: args.folder,
            target_height: args.target_height,
            watermark_file: args.watermark_file,
            json: args.json,
        }
    }
}
