//! Shared Utilities for modern_format_boost tools
//!
//! Common functionality used by the image conversion tools:
//! - Logging setup and logged external command execution
//! - External tools detection
//! - Safe path arguments for encoder command lines
//! - Batch bookkeeping and summary reporting

pub mod batch;
pub mod logging;
pub mod path_safety;
pub mod report;
pub mod tools;

pub use batch::BatchResult;
pub use logging::{execute_external_command, format_command_line, ExternalCommandResult};
pub use path_safety::{path_arg, safe_path_arg};
pub use report::{format_bytes, format_duration, print_summary_report};
pub use tools::{find_tool, find_tool_in, ExternalTool, ToolNotFound, AVIFENC, CJXL};
