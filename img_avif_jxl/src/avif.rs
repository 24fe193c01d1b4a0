//! AVIF converter (avifenc).

use crate::config::ConvertConfig;
use crate::encoder::{self, ConversionOutcome, EncodeRequest, EncoderTools};
use crate::scanner::FileEntry;
use crate::Result;
use shared_utils::path_arg;
use std::ffi::OsString;
use std::path::Path;

pub const MIN_QUANTIZER: u8 = 0;
pub const MAX_QUANTIZER: u8 = 60;
pub const CQ_LEVEL: u8 = 18;
pub const JOBS: u8 = 8;

/// `-q <quality> --min 0 --max 60 -a end-usage=q -a cq-level=18 -a tune=ssim --jobs 8 <input> <output>`
pub fn avif_args(quality: i32, input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-q".into(),
        quality.to_string().into(),
        "--min".into(),
        MIN_QUANTIZER.to_string().into(),
        "--max".into(),
        MAX_QUANTIZER.to_string().into(),
        "-a".into(),
        "end-usage=q".into(),
        "-a".into(),
        format!("cq-level={}", CQ_LEVEL).into(),
        "-a".into(),
        "tune=ssim".into(),
        "--jobs".into(),
        JOBS.to_string().into(),
        path_arg(input),
        path_arg(output),
    ]
}

/// Encode `entry` to `<directory>/<stem>.avif`.
pub fn convert_to_avif(
    entry: &FileEntry,
    config: &ConvertConfig,
    tools: &EncoderTools,
) -> Result<ConversionOutcome> {
    let input = entry.path().to_path_buf();
    let output = encoder::output_path(&config.directory, entry.stem(), "avif");
    let args = avif_args(config.quality, &input, &output);

    encoder::execute(
        EncodeRequest {
            tool: "avifenc",
            program: &tools.avifenc,
            input,
            output,
            args,
        },
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::path::PathBuf;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_avif_args_template() {
        let args = avif_args(75, Path::new("photos/a.jpg"), Path::new("photos/a.avif"));
        assert_eq!(
            strings(&args),
            vec![
                "-q", "75", "--min", "0", "--max", "60", "-a", "end-usage=q", "-a",
                "cq-level=18", "-a", "tune=ssim", "--jobs", "8", "photos/a.jpg", "photos/a.avif",
            ]
        );
    }

    #[test]
    fn test_quality_is_verbatim() {
        let args = avif_args(-3, Path::new("a.jpg"), Path::new("a.avif"));
        assert_eq!(strings(&args)[1], "-3");
    }

    #[test]
    fn test_dash_directory_is_protected() {
        let args = avif_args(75, Path::new("-odd/a.jpg"), Path::new("-odd/a.avif"));
        let args = strings(&args);
        assert_eq!(args[14], "./-odd/a.jpg");
        assert_eq!(args[15], "./-odd/a.avif");
    }

    #[test]
    fn test_convert_to_avif_plans_sibling_output() {
        let config = ConvertConfig::new("photos")
            .with_quality(60)
            .with_dry_run(true)
            .with_output_format(OutputFormat::Json);
        let tools = EncoderTools {
            avifenc: PathBuf::from("/usr/bin/avifenc"),
            cjxl: PathBuf::from("/usr/bin/cjxl"),
        };
        let entry = FileEntry::new(Path::new("photos"), "beach.jpeg", false);

        let outcome = convert_to_avif(&entry, &config, &tools).unwrap();
        assert_eq!(
            outcome,
            ConversionOutcome::Planned {
                command: "avifenc -q 60 --min 0 --max 60 -a end-usage=q -a cq-level=18 \
                          -a tune=ssim --jobs 8 photos/beach.jpeg photos/beach.avif"
                    .to_string()
            }
        );
    }
}
