use anyhow::Context;
use img_avif_jxl::cli::Cli;
use img_avif_jxl::{run_batch, BatchReport, ConvertConfig, EncoderTools, OutputFormat};
use shared_utils::logging::{init_logging, LogConfig};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_normalized();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let Some(config) = cli.into_config() else {
        eprintln!("dir is a required flag");
        std::process::exit(1);
    };

    if let Err(e) = init_logging("img_avif_jxl", LogConfig::default().with_level(level)) {
        eprintln!("⚠️  Logging disabled: {:#}", e);
    }

    let report = match convert(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Run aborted");
            return Err(e);
        }
    };

    match config.output_format {
        OutputFormat::Human => {
            shared_utils::print_summary_report(&report.summary, report.duration, "AVIF + JXL")
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} files failed to convert",
            report.summary.failed,
            report.summary.total
        );
    }

    Ok(())
}

fn convert(config: &ConvertConfig) -> anyhow::Result<BatchReport> {
    let tools = EncoderTools::locate()?;
    tracing::info!(
        avifenc = %tools.avifenc.display(),
        cjxl = %tools.cjxl.display(),
        "Encoders found"
    );

    run_batch(config, &tools)
        .with_context(|| format!("Batch conversion of {} aborted", config.directory.display()))
}
