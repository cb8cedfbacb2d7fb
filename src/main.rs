use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod batch;
mod config;
mod error;
mod preprocessing;
mod watermark;

#[derive(Parser, Debug)]
#[command(name = "physique-prep")]
#[command(about = "Overlay image preprocessor for the physique tracker")]
#[command(version)]
pub struct Args {
    /// Folder of overlay PNGs to process
    #[arg(long, env = "PHYSIQUE_DIR", default_value = "Physique")]
    pub folder: PathBuf,

    /// Target height in pixels for processed overlays
    #[arg(
        long,
        env = "PHYSIQUE_TARGET_HEIGHT",
        default_value = "500",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub target_height: u32,

    /// File recording the date of the last completed run
    #[arg(
        long,
        env = "PHYSIQUE_WATERMARK_FILE",
        default_value = "last_preprocessing.txt"
    )]
    pub watermark_file: PathBuf,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; logs go to stderr so --json stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting physique-prep v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Preprocessing {} to height {}px",
        config.folder.display(),
        config.target_height
    );

    batch::run(config)
}
