//! External Tools Detection
//!
//! Resolves encoder executables on the search path before a batch starts.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An external executable the tools depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalTool {
    /// Executable name looked up on `PATH`
    pub command: &'static str,
    /// Library / package that ships the executable
    pub library: &'static str,
}

pub const AVIFENC: ExternalTool = ExternalTool {
    command: "avifenc",
    library: "libavif",
};

pub const CJXL: ExternalTool = ExternalTool {
    command: "cjxl",
    library: "libjxl",
};

#[derive(Error, Debug)]
#[error(
    "Could not find {} installation ({} is not on the search path). Check to see if you've installed the library.",
    tool.library,
    tool.command
)]
pub struct ToolNotFound {
    pub tool: ExternalTool,
    #[source]
    pub source: which::Error,
}

/// Resolve `tool` against the process `PATH`.
pub fn find_tool(tool: ExternalTool) -> Result<PathBuf, ToolNotFound> {
    which::which(tool.command).map_err(|source| ToolNotFound { tool, source })
}

/// Resolve `tool` against an explicit search path (same syntax as `PATH`).
pub fn find_tool_in<P: AsRef<OsStr>>(
    tool: ExternalTool,
    search_path: Option<P>,
    cwd: &Path,
) -> Result<PathBuf, ToolNotFound> {
    which::which_in(tool.command, search_path, cwd).map_err(|source| ToolNotFound { tool, source })
}
