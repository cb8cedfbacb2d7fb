use crate::config::Config;
use crate::error::PrepError;
use crate::preprocessing::{Outcome, Pipeline};
use crate::watermark;
use chrono::{DateTime, NaiveDate, Utc};
use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// A PNG in the folder together with its modification time
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    modified: SystemTime,
}

/// Per-file entry in the run report
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub outcome: Outcome,
    pub width: u32,
    pub height: u32,
    pub time_ms: u64,
}

/// A file that failed to decode and was skipped
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of one batch run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub folder: PathBuf,
    pub target_height: u32,
    /// Watermark date the run was gated on
    pub watermark: String,
    /// Date written back after a clean run, if any
    pub new_watermark: Option<String>,
    pub processed: Vec<ProcessedFile>,
    /// Files left untouched because they predate the watermark
    pub skipped: usize,
    pub failed: Vec<FailedFile>,
    pub total_time_ms: u64,
}

/// Run the full preprocessing batch
pub fn run(config: Config) -> anyhow::Result<()> {
    let since = watermark::read(&config.watermark_file)?;
    tracing::info!(
        "Scanning {} for overlays modified after {}",
        config.folder.display(),
        since
    );

    let mut report = process_folder(&config.folder, since, config.target_height)?;

    if report.failed.is_empty() {
        let today = Utc::now().date_naive();
        watermark::write(&config.watermark_file, today)?;
        report.new_watermark = Some(today.to_string());
    } else {
        tracing::warn!(
            "{} file(s) failed to decode; keeping watermark at {} so they are retried",
            report.failed.len(),
            since
        );
    }

    tracing::info!(
        "Batch finished in {}ms: {} processed, {} skipped, {} failed",
        report.total_time_ms,
        report.processed.len(),
        report.skipped,
        report.failed.len()
    );

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Process every qualifying PNG directly inside `folder`.
///
/// Files are visited in ascending modification time order. A file qualifies
/// when its modified day (UTC) is strictly after `since`. Each qualifying
/// file is trimmed and rescaled to `target_height`, then overwritten in
/// place; fully transparent images are reported but not rewritten. A decode
/// failure skips that file and continues; any other filesystem error stops
/// the batch.
pub fn process_folder(
    folder: &Path,
    since: NaiveDate,
    target_height: u32,
) -> Result<RunReport, PrepError> {
    let start = Instant::now();
    let pipeline = Pipeline::new(target_height);

    let mut report = RunReport {
        folder: folder.to_path_buf(),
        target_height,
        watermark: since.to_string(),
        new_watermark: None,
        processed: Vec::new(),
        skipped: 0,
        failed: Vec::new(),
        total_time_ms: 0,
    };

    for candidate in list_pngs(folder)? {
        if modified_day(candidate.modified) <= since {
            tracing::debug!(
                "Skipping {} (not modified after {})",
                candidate.path.display(),
                since
            );
            report.skipped += 1;
            continue;
        }

        let file_start = Instant::now();
        let image = match image::open(&candidate.path) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Could not load image {}: {}", candidate.path.display(), e);
                report.failed.push(FailedFile {
                    path: candidate.path.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let result = pipeline.process(image);
        match result.outcome {
            Outcome::Scaled => save_png(&result.image, &candidate.path)?,
            Outcome::FullyTransparent => {
                tracing::warn!(
                    "{} is fully transparent; leaving it untouched",
                    candidate.path.display()
                );
            }
        }

        let (width, height) = result.image.dimensions();
        let time_ms = file_start.elapsed().as_millis() as u64;
        tracing::info!(
            "{} {} -> {}x{} in {}ms",
            result.outcome.as_str(),
            candidate.path.display(),
            width,
            height,
            time_ms
        );

        report.processed.push(ProcessedFile {
            path: candidate.path,
            outcome: result.outcome,
            width,
            height,
            time_ms,
        });
    }

    report.total_time_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}

/// List the PNG files directly inside `folder`, sorted by ascending
/// modification time with ties broken by path.
fn list_pngs(folder: &Path) -> Result<Vec<Candidate>, PrepError> {
    let entries = fs::read_dir(folder)
        .map_err(|e| PrepError::FolderScan(format!("{}: {}", folder.display(), e)))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PrepError::FolderScan(format!("{}: {}", folder.display(), e)))?;
        let path = entry.path();
        if !is_png(&path) {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| PrepError::Metadata(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata
            .modified()
            .map_err(|e| PrepError::Metadata(format!("{}: {}", path.display(), e)))?;

        candidates.push(Candidate { path, modified });
    }

    candidates.sort_by(|a, b| (a.modified, &a.path).cmp(&(b.modified, &b.path)));
    Ok(candidates)
}

/// Check the file extension, ignoring ASCII case
fn is_png(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Calendar day (UTC) of a file modification time
fn modified_day(modified: SystemTime) -> NaiveDate {
    let datetime: DateTime<Utc> = modified.into();
    datetime.date_naive()
}

/// Overwrite `path` with `image` encoded as PNG. The encode goes to a temp
/// file in the same directory which is then renamed over the original.
fn save_png(image: &DynamicImage, path: &Path) -> Result<(), PrepError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| PrepError::Save(format!("{}: {}", path.display(), e)))?;

    image
        .write_to(&mut temp_file, ImageFormat::Png)
        .map_err(|e| PrepError::Save(format!("{}: {}", path.display(), e)))?;

    temp_file
        .persist(path)
        .map_err(|e| PrepError::Save(format!("{}: {}", path.display(), e)))?;

    Ok(())
}
