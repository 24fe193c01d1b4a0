//! Error types for the converter.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    ToolNotFound(#[from] shared_utils::ToolNotFound),

    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start {tool} for {}: {source}", input.display())]
    Launch {
        tool: &'static str,
        input: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed on {} ({}): {}", input.display(), exit_description(*exit_code), stderr.trim())]
    EncoderFailed {
        tool: &'static str,
        input: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Output already exists: {}", path.display())]
    OutputExists { path: PathBuf },
}

impl ConvertError {
    /// Errors raised while converting one file, as opposed to the run-level
    /// preconditions (tools, directory).
    pub fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            ConvertError::Launch { .. }
                | ConvertError::EncoderFailed { .. }
                | ConvertError::OutputExists { .. }
        )
    }
}

fn exit_description(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
