//! img-avif-jxl: batch JPEG → AVIF + JPEG-XL conversion through the external
//! `avifenc` and `cjxl` encoders.
//!
//! Pipeline: tool check → directory scan → extension dispatch → AVIF
//! converter → JXL converter, one file at a time.

pub mod avif;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod jxl;
pub mod runner;
pub mod scanner;

pub use config::{ConvertConfig, ExistingOutputPolicy, FailurePolicy, OutputFormat};
pub use encoder::{ConversionOutcome, EncoderTools};
pub use error::{ConvertError, Result};
pub use runner::{run_batch, BatchReport, FileReport, FileStatus};
pub use scanner::{scan_directory, FileEntry};
