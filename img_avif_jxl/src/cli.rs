//! Command line front-end.

use crate::config::{
    ConvertConfig, ExistingOutputPolicy, FailurePolicy, OutputFormat, DEFAULT_LOSSLESS_JPEG,
    DEFAULT_QUALITY,
};
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "img-avif-jxl")]
#[command(
    version,
    about = "Convert every JPEG in a directory to AVIF (avifenc) and JPEG-XL (cjxl)",
    long_about = None,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Directory containing images (required)
    #[arg(long, value_name = "DIR", allow_hyphen_values = true)]
    pub dir: Option<OsString>,

    /// Quality argument passed to the encoders
    #[arg(long, default_value_t = DEFAULT_QUALITY)]
    pub quality: i32,

    /// 1: transcode JPEG to JXL losslessly (JXL quality forced to 100), 0: re-encode
    #[arg(
        long = "lossless_jpeg",
        visible_alias = "lossless-jpeg",
        default_value_t = DEFAULT_LOSSLESS_JPEG,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub lossless_jpeg: u8,

    /// What to do when an output file already exists
    #[arg(long, value_enum, default_value_t = ExistingOutputPolicy::Overwrite)]
    pub existing: ExistingOutputPolicy,

    /// Keep converting after a failed conversion instead of aborting
    #[arg(
        long = "keep_going",
        visible_alias = "keep-going",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub keep_going: bool,

    /// Print the encoder commands without running them
    #[arg(
        long = "dry_run",
        visible_alias = "dry-run",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub dry_run: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Debug-level logging
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub verbose: bool,
}

impl Cli {
    /// Parse the process arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// `None` when `-dir` was omitted or empty.
    pub fn directory(&self) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn into_config(self) -> Option<ConvertConfig> {
        let directory = self.directory()?;
        let failure_policy = if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        };
        Some(
            ConvertConfig::new(directory)
                .with_quality(self.quality)
                .with_lossless_jpeg(self.lossless_jpeg)
                .with_existing(self.existing)
                .with_failure_policy(failure_policy)
                .with_dry_run(self.dry_run)
                .with_output_format(self.output),
        )
    }
}

/// Rewrite single-dash long flags (`-dir`, `-quality=50`) to the
/// double-dash form clap expects. Short flags, values and everything after
/// `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let long_names: Vec<&str> = command
        .get_arguments()
        .flat_map(|arg| {
            arg.get_long()
                .into_iter()
                .chain(arg.get_all_aliases().into_iter().flatten())
        })
        .chain(["help", "version"])
        .collect();

    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if long_names.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["img-avif-jxl"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["-dir", "photos"]);
        assert_eq!(cli.directory(), Some(PathBuf::from("photos")));
        assert_eq!(cli.quality, 75);
        assert_eq!(cli.lossless_jpeg, 1);
        assert_eq!(cli.existing, ExistingOutputPolicy::Overwrite);
        assert!(!cli.keep_going);
        assert!(!cli.dry_run);
        assert_eq!(cli.output, OutputFormat::Human);
    }

    #[test]
    fn test_single_dash_flags_with_equals() {
        let cli = parse(&["-dir=photos", "-quality=50", "-lossless_jpeg=0"]);
        assert_eq!(cli.directory(), Some(PathBuf::from("photos")));
        assert_eq!(cli.quality, 50);
        assert_eq!(cli.lossless_jpeg, 0);
    }

    #[test]
    fn test_double_dash_flags() {
        let cli = parse(&["--dir", "photos", "--quality", "60", "--lossless-jpeg", "0"]);
        assert_eq!(cli.quality, 60);
        assert_eq!(cli.lossless_jpeg, 0);
    }

    #[test]
    fn test_boolean_flags() {
        let cli = parse(&["-dir", "p", "-keep_going", "-dry_run", "-verbose=false"]);
        assert!(cli.keep_going);
        assert!(cli.dry_run);
        assert!(!cli.verbose);

        let cli = parse(&["-dir", "p", "-keep_going=false"]);
        assert!(!cli.keep_going);
    }

    #[test]
    fn test_dir_value_may_start_with_dash() {
        assert_eq!(parse(&["-dir", "-odd"]).directory(), Some(PathBuf::from("-odd")));
        assert_eq!(parse(&["--dir", "-x", "-quality", "40"]).quality, 40);
    }

    #[test]
    fn test_negative_quality_passes_through() {
        let cli = parse(&["-dir", "p", "-quality", "-5"]);
        assert_eq!(cli.quality, -5);
    }

    #[test]
    fn test_lossless_flag_rejects_other_values() {
        let argv = normalize_args(["img-avif-jxl", "-dir", "p", "-lossless_jpeg", "2"]);
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_existing_policy_values() {
        assert_eq!(parse(&["-dir", "p", "-existing", "skip"]).existing, ExistingOutputPolicy::Skip);
        assert_eq!(parse(&["-dir", "p", "-existing=fail"]).existing, ExistingOutputPolicy::Fail);
    }

    #[test]
    fn test_missing_dir_yields_no_config() {
        assert!(parse(&[]).into_config().is_none());
        assert!(parse(&["-dir="]).into_config().is_none());
        assert!(parse(&["-quality", "30"]).directory().is_none());
    }

    #[test]
    fn test_into_config() {
        let config = parse(&["-dir", "photos", "-quality", "50", "-lossless_jpeg", "0", "-keep_going"])
            .into_config()
            .unwrap();
        assert_eq!(config.quality, 50);
        assert_eq!(config.jxl_quality(), 50);
        assert_eq!(config.failure_policy, FailurePolicy::KeepGoing);
    }

    #[test]
    fn test_normalize_leaves_values_and_short_flags() {
        let out = normalize_args(["prog", "-dir", "-h", "-x", "--", "-quality"]);
        let out: Vec<_> = out.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(out, vec!["prog", "--dir", "-h", "-x", "--", "-quality"]);
    }
}
