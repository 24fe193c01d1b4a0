//! JPEG-XL converter (cjxl).

use crate::config::ConvertConfig;
use crate::encoder::{self, ConversionOutcome, EncodeRequest, EncoderTools};
use crate::scanner::FileEntry;
use crate::Result;
use shared_utils::path_arg;
use std::ffi::OsString;
use std::path::Path;

/// `--num_threads -1`: let cjxl use every core.
pub const NUM_THREADS: i32 = -1;

/// `-q <quality> --num_threads -1 -j <lossless_jpeg> <input> <output>`
pub fn jxl_args(quality: i32, lossless_jpeg: u8, input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-q".into(),
        quality.to_string().into(),
        "--num_threads".into(),
        NUM_THREADS.to_string().into(),
        "-j".into(),
        lossless_jpeg.to_string().into(),
        path_arg(input),
        path_arg(output),
    ]
}

/// Encode `entry` to `<directory>/<stem>.jxl`.
///
/// With lossless transcoding on, quality is pinned to 100 whatever
/// `config.quality` says.
pub fn convert_to_jxl(
    entry: &FileEntry,
    config: &ConvertConfig,
    tools: &EncoderTools,
) -> Result<ConversionOutcome> {
    let input = entry.path().to_path_buf();
    let output = encoder::output_path(&config.directory, entry.stem(), "jxl");
    let args = jxl_args(config.jxl_quality(), config.lossless_jpeg, &input, &output);

    encoder::execute(
        EncodeRequest {
            tool: "cjxl",
            program: &tools.cjxl,
            input,
            output,
            args,
        },
        config,
    )
}
