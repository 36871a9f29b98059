//! Convert Service - Core Use Case for Dataset Publication
//!
//! This service orchestrates the complete conversion workflow:
//! 1. Scan the data directory for tariff workbooks (.xlsx)
//! 2. Load each workbook and route it by its file name marker
//! 3. Normalize sheet rows into tariff rows, one table per origin
//! 4. Merge everything into a single dataset
//! 5. Publish the dataset as db.json through the repository
//! 6. Return a conversion summary

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use unim_domain::model::Dataset;
use unim_domain::repository::DatasetRepository;
use unim_infra::builder::append_workbook;
use unim_infra::tariff_xlsx::{load_workbook, scan_data_dir};
use unim_types::TripType;

/// Progress callback invoked once per scanned file
pub type ProgressCallback = Box<dyn Fn(&str) + Send>;

/// Errors specific to the convert service
#[derive(Debug, Error)]
pub enum ConvertServiceError {
    #[error("Data directory scan failed: {0}")]
    ScanFailed(String),

    #[error("Failed to publish dataset: {0}")]
    PublishFailed(String),
}

impl From<ConvertServiceError> for unim_types::Error {
    fn from(err: ConvertServiceError) -> Self {
        match err {
            ConvertServiceError::ScanFailed(m) | ConvertServiceError::PublishFailed(m) => {
                unim_types::Error::ConversionFailed(m)
            }
        }
    }
}

/// What happened to a single scanned workbook file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum FileStatus {
    /// Routed by marker and merged into the dataset
    Converted { trip_type: TripType, sheets: usize },

    /// File name carries neither trip marker
    Skipped,

    /// Workbook could not be read
    Failed { message: String },
}

/// Per-file outcome of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Summary of a completed conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub files_found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub one_way_origins: usize,
    pub round_trip_origins: usize,
    pub total_rows: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl ConvertSummary {
    /// Duration of the run in seconds
    pub fn elapsed_secs(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }
}

/// Main entry point: Convert a directory of tariff workbooks into db.json
///
/// # Arguments
/// * `data_dir` - Directory scanned (recursively) for .xlsx workbooks
/// * `repo` - Repository the merged dataset is published through
/// * `progress` - Optional progress callback, called with each file name
///
/// # Returns
/// * The merged dataset and a `ConvertSummary` of per-file outcomes
pub fn convert_directory<R: DatasetRepository>(
    data_dir: &Path,
    repo: &R,
    progress: Option<ProgressCallback>,
) -> std::result::Result<(Dataset, ConvertSummary), ConvertServiceError> {
    let started_at = Utc::now();

    // Step 1: Scan for workbooks
    let files =
        scan_data_dir(data_dir).map_err(|e| ConvertServiceError::ScanFailed(e.to_string()))?;

    // Steps 2-4: Load, route and merge each workbook
    let mut dataset = Dataset::new();
    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if let Some(ref callback) = progress {
            callback(&file_name);
        }

        let status = match load_workbook(path) {
            Ok(workbook) => match append_workbook(&mut dataset, &workbook) {
                Some((trip_type, sheets)) => FileStatus::Converted { trip_type, sheets },
                None => FileStatus::Skipped,
            },
            Err(e) => FileStatus::Failed {
                message: e.to_string(),
            },
        };

        outcomes.push(FileOutcome { file_name, status });
    }

    // Step 5: Publish
    repo.save(&dataset)
        .map_err(|e| ConvertServiceError::PublishFailed(e.to_string()))?;

    // Step 6: Summarize
    let completed_at = Utc::now();
    let converted = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Converted { .. }))
        .count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Skipped))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Failed { .. }))
        .count();

    let summary = ConvertSummary {
        started_at,
        completed_at,
        files_found: files.len(),
        converted,
        skipped,
        failed,
        one_way_origins: dataset.trip(TripType::OneWay).len(),
        round_trip_origins: dataset.trip(TripType::RoundTrip).len(),
        total_rows: dataset.row_count(),
        outcomes,
    };

    Ok((dataset, summary))
}
