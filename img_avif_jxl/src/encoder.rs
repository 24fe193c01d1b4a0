//! The step shared by both converters: output pre-check, dry run, running
//! the encoder and turning its exit status into a result.

use crate::config::{ConvertConfig, ExistingOutputPolicy};
use crate::{ConvertError, Result};
use console::style;
use serde::Serialize;
use shared_utils::{execute_external_command, format_command_line, AVIFENC, CJXL};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved encoder executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderTools {
    pub avifenc: PathBuf,
    pub cjxl: PathBuf,
}

impl EncoderTools {
    /// Resolve both encoders on `PATH`; the first missing one is fatal.
    pub fn locate() -> Result<Self> {
        Ok(Self {
            avifenc: shared_utils::find_tool(AVIFENC)?,
            cjxl: shared_utils::find_tool(CJXL)?,
        })
    }

    /// As [`EncoderTools::locate`] with an explicit search path.
    pub fn locate_in(search_path: &OsStr, cwd: &Path) -> Result<Self> {
        Ok(Self {
            avifenc: shared_utils::find_tool_in(AVIFENC, Some(search_path), cwd)?,
            cjxl: shared_utils::find_tool_in(CJXL, Some(search_path), cwd)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// Sizes are `None` when the path is not a regular file.
    Converted {
        output: PathBuf,
        #[serde(skip_serializing_if = "Option::is_none")]
        input_size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        output_size: Option<u64>,
    },
    SkippedExisting {
        output: PathBuf,
    },
    /// Dry run: the command line that would have been executed.
    Planned {
        command: String,
    },
}

/// What is at an output path before encoding. Symlinks are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingOutput {
    Absent,
    Regular,
    NonRegular,
}

pub fn inspect_output(path: &Path) -> ExistingOutput {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => ExistingOutput::Regular,
        Ok(_) => ExistingOutput::NonRegular,
        Err(_) => ExistingOutput::Absent,
    }
}

/// `<directory>/<stem>.<extension>`, stem bytes preserved.
pub fn output_path(directory: &Path, stem: &OsStr, extension: &str) -> PathBuf {
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    directory.join(name)
}

/// Size of `path` if it is a regular file.
fn regular_file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.len()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot stat file");
            None
        }
    }
}

/// One encoder invocation, fully built.
#[derive(Debug)]
pub struct EncodeRequest<'a> {
    pub tool: &'static str,
    pub program: &'a Path,
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

impl EncodeRequest<'_> {
    pub fn command_line(&self) -> String {
        format_command_line(self.tool, &self.args)
    }
}

/// Run `request` under the configured existing-output policy.
pub fn execute(request: EncodeRequest<'_>, config: &ConvertConfig) -> Result<ConversionOutcome> {
    let existing = inspect_output(&request.output);

    if existing == ExistingOutput::NonRegular {
        tracing::warn!(
            output = %request.output.display(),
            "Output exists and is not a regular file"
        );
        if config.prints_notices() {
            println!("   {} File exists. Breaking...", style("⚠️").yellow());
        }
    }

    if existing != ExistingOutput::Absent {
        match config.existing {
            ExistingOutputPolicy::Overwrite => {}
            ExistingOutputPolicy::Skip => {
                tracing::info!(
                    tool = request.tool,
                    output = %request.output.display(),
                    "Skipped: output exists"
                );
                if config.prints_notices() {
                    println!(
                        "   {} {} exists, skipping {}",
                        style("⏭️").dim(),
                        request.output.display(),
                        request.tool
                    );
                }
                return Ok(ConversionOutcome::SkippedExisting {
                    output: request.output,
                });
            }
            ExistingOutputPolicy::Fail => {
                return Err(ConvertError::OutputExists {
                    path: request.output,
                });
            }
        }
    }

    if config.dry_run {
        let command = request.command_line();
        if config.prints_notices() {
            println!("   {}", command);
        }
        return Ok(ConversionOutcome::Planned { command });
    }

    let result = execute_external_command(request.tool, request.program, &request.args).map_err(
        |source| ConvertError::Launch {
            tool: request.tool,
            input: request.input.clone(),
            source,
        },
    )?;

    if !result.success() {
        return Err(ConvertError::EncoderFailed {
            tool: request.tool,
            input: request.input,
            exit_code: result.exit_code,
            stderr: result.stderr,
        });
    }

    let input_size = regular_file_size(&request.input);
    let output_size = regular_file_size(&request.output);

    if config.prints_notices() {
        match output_size {
            Some(size) => println!(
                "   {} {} ({})",
                style("✅").green(),
                request.output.display(),
                shared_utils::format_bytes(size)
            ),
            None => println!("   {} {}", style("✅").green(), request.output.display()),
        }
    }

    Ok(ConversionOutcome::Converted {
        output: request.output,
        input_size,
        output_size,
    })
}
