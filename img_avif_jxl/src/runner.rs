//! Batch runner: scan, dispatch, AVIF then JXL for every JPEG, one file at
//! a time.

use crate::avif::convert_to_avif;
use crate::config::{ConvertConfig, FailurePolicy};
use crate::dispatch::{route, Route};
use crate::encoder::{ConversionOutcome, EncoderTools};
use crate::jxl::convert_to_jxl;
use crate::scanner::{scan_directory, FileEntry};
use crate::Result;
use console::style;
use serde::Serialize;
use shared_utils::BatchResult;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepResult {
    Done(ConversionOutcome),
    /// Only recorded under [`FailurePolicy::KeepGoing`].
    Failed { error: String },
}

impl StepResult {
    fn error(&self) -> Option<&str> {
        match self {
            StepResult::Failed { error } => Some(error),
            StepResult::Done(_) => None,
        }
    }

    fn is_skipped_existing(&self) -> bool {
        matches!(
            self,
            StepResult::Done(ConversionOutcome::SkippedExisting { .. })
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avif: Option<StepResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jxl: Option<StepResult>,
}

impl FileReport {
    fn unrecognized(entry: &FileEntry) -> Self {
        Self {
            name: entry.display_name().into_owned(),
            path: entry.path().to_path_buf(),
            status: FileStatus::Skipped,
            avif: None,
            jxl: None,
        }
    }

    fn converted(entry: &FileEntry, avif: StepResult, jxl: StepResult) -> Self {
        let status = if avif.error().is_some() || jxl.error().is_some() {
            FileStatus::Failed
        } else if avif.is_skipped_existing() && jxl.is_skipped_existing() {
            FileStatus::Skipped
        } else {
            FileStatus::Succeeded
        };

        Self {
            name: entry.display_name().into_owned(),
            path: entry.path().to_path_buf(),
            status,
            avif: Some(avif),
            jxl: Some(jxl),
        }
    }

    fn steps(&self) -> impl Iterator<Item = &StepResult> {
        self.avif.iter().chain(self.jxl.iter())
    }

    pub fn errors(&self) -> Vec<String> {
        self.steps()
            .filter_map(|step| step.error().map(str::to_string))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub summary: BatchResult,
    pub files: Vec<FileReport>,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl BatchReport {
    fn new(config: &ConvertConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            dry_run: config.dry_run,
            summary: BatchResult::new(),
            files: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    fn record(&mut self, file: FileReport) {
        match file.status {
            FileStatus::Succeeded => self.summary.success(),
            FileStatus::Skipped => self.summary.skip(),
            FileStatus::Failed => self.summary.fail(file.path.clone(), file.errors()),
        }

        for step in file.steps() {
            if let StepResult::Done(ConversionOutcome::Converted {
                input_size: Some(input_size),
                output_size: Some(output_size),
                ..
            }) = step
            {
                self.summary.add_sizes(*input_size, *output_size);
            }
        }

        self.files.push(file);
    }

    pub fn has_failures(&self) -> bool {
        self.summary.has_failures()
    }
}

/// Convert every `.jpg` / `.jpeg` entry of `config.directory`.
///
/// Under [`FailurePolicy::FailFast`] the first failed conversion is returned
/// as the error and nothing after it runs. Under
/// [`FailurePolicy::KeepGoing`] failures are collected in the report.
pub fn run_batch(config: &ConvertConfig, tools: &EncoderTools) -> Result<BatchReport> {
    let start = Instant::now();
    let entries = scan_directory(&config.directory)?;

    tracing::info!(
        directory = %config.directory.display(),
        entries = entries.len(),
        quality = config.quality,
        lossless_jpeg = config.lossless_jpeg,
        existing = ?config.existing,
        failure_policy = ?config.failure_policy,
        dry_run = config.dry_run,
        "Starting batch"
    );

    let mut report = BatchReport::new(config);
    for entry in &entries {
        report.record(process_entry(entry, config, tools)?);
    }
    report.duration = start.elapsed();

    tracing::info!(
        total = report.summary.total,
        succeeded = report.summary.succeeded,
        failed = report.summary.failed,
        skipped = report.summary.skipped,
        duration_secs = report.duration.as_secs_f64(),
        "Batch finished"
    );

    Ok(report)
}

fn process_entry(
    entry: &FileEntry,
    config: &ConvertConfig,
    tools: &EncoderTools,
) -> Result<FileReport> {
    if config.prints_notices() {
        println!(
            "{} {} {}",
            style("📄").cyan(),
            entry.display_name(),
            style(format!("[{}]", entry.extension().to_string_lossy())).dim()
        );
    }

    match route(entry) {
        Route::Skip => {
            tracing::debug!(file = %entry.display_name(), "Unrecognized file extension, skipping");
            if config.prints_notices() {
                println!("   Unrecognized File Extension. Skipping.");
            }
            Ok(FileReport::unrecognized(entry))
        }
        Route::Convert => {
            let avif = settle(entry, config, convert_to_avif(entry, config, tools))?;
            let jxl = settle(entry, config, convert_to_jxl(entry, config, tools))?;
            Ok(FileReport::converted(entry, avif, jxl))
        }
    }
}

/// Apply the failure policy to one conversion.
fn settle(
    entry: &FileEntry,
    config: &ConvertConfig,
    result: Result<ConversionOutcome>,
) -> Result<StepResult> {
    let e = match result {
        Ok(outcome) => return Ok(StepResult::Done(outcome)),
        Err(e) => e,
    };

    tracing::error!(file = %entry.path().display(), error = %e, "Conversion failed");

    if config.failure_policy == FailurePolicy::KeepGoing && e.is_conversion_failure() {
        if config.prints_notices() {
            println!("   {} {}", style("❌").red(), e);
        }
        Ok(StepResult::Failed {
            error: e.to_string(),
        })
    } else {
        Err(e)
    }
}
