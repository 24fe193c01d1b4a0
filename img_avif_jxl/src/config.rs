//! Run configuration, built once from the command line and passed by
//! reference to every stage.

use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_QUALITY: i32 = 75;
/// `1` = transcode JPEG losslessly into JPEG-XL
pub const DEFAULT_LOSSLESS_JPEG: u8 = 1;

/// What to do when `<stem>.avif` / `<stem>.jxl` is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExistingOutputPolicy {
    /// Encode anyway; only a non-regular output is reported.
    #[default]
    Overwrite,
    /// Leave the existing output alone and skip the encoder.
    Skip,
    /// Treat an existing output as a conversion failure.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failed conversion.
    #[default]
    FailFast,
    /// Record the failure and move on to the next conversion.
    KeepGoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub directory: PathBuf,
    /// Passed verbatim to both encoders (JXL may override it, see
    /// [`ConvertConfig::jxl_quality`]).
    pub quality: i32,
    /// Raw `-j` value for cjxl, 0 or 1.
    pub lossless_jpeg: u8,
    pub existing: ExistingOutputPolicy,
    pub failure_policy: FailurePolicy,
    pub dry_run: bool,
    pub output_format: OutputFormat,
}

impl ConvertConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            quality: DEFAULT_QUALITY,
            lossless_jpeg: DEFAULT_LOSSLESS_JPEG,
            existing: ExistingOutputPolicy::default(),
            failure_policy: FailurePolicy::default(),
            dry_run: false,
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_lossless_jpeg(mut self, lossless_jpeg: u8) -> Self {
        self.lossless_jpeg = lossless_jpeg;
        self
    }

    pub fn with_existing(mut self, existing: ExistingOutputPolicy) -> Self {
        self.existing = existing;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn is_lossless_transcode(&self) -> bool {
        self.lossless_jpeg == 1
    }

    /// Quality handed to cjxl: lossless transcoding pins it to 100.
    pub fn jxl_quality(&self) -> i32 {
        if self.is_lossless_transcode() {
            100
        } else {
            self.quality
        }
    }

    /// Human-readable notices on stdout; json mode keeps stdout for the
    /// summary document.
    pub fn prints_notices(&self) -> bool {
        self.output_format == OutputFormat::Human
    }
}
