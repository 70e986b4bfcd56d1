use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use instafit::config::parse_fill_alpha;
use instafit::{AspectRatio, BatchConfig, JobResult, WatermarkConfig, background_color};

/// Fit every JPEG in a folder onto one shared aspect-ratio canvas.
#[derive(Parser, Debug)]
#[command(name = "instafit", version)]
struct Cli {
    /// Folder holding the `jpg`/`jpeg` inputs (not searched recursively).
    #[arg(short, long)]
    source: PathBuf,

    /// Output folder. Defaults to `<source>/out`.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Padding color: a name such as `white` or `dark_gray`, or `#RRGGBB`.
    #[arg(short, long, default_value = "black")]
    color: String,

    /// Ambient fill opacity; clamped into `[0, 1]`, `0` disables the fill.
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    fill: String,

    /// Target ratio `W:H`, skipping automatic resolution.
    #[arg(short, long)]
    ratio: Option<String>,

    /// Watermark configuration JSON.
    #[arg(short, long)]
    watermarks: Option<PathBuf>,

    /// Shrink outputs so their longest edge is at most this many pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_size: Option<u32>,

    /// Worker thread count. Defaults to the available parallelism.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(cli)?;
    let report = instafit::run_batch(&config)
        .with_context(|| format!("process '{}'", config.source_dir.display()))?;

    for failure in report.failures() {
        if let JobResult::Failure {
            source_path,
            kind,
            message,
        } = failure
        {
            eprintln!("{kind}: {}: {message}", source_path.display());
        }
    }
    eprintln!(
        "fitted {} of {} images to {} in {:.2?}",
        report.successes().count(),
        report.results.len(),
        report.ratio,
        report.elapsed
    );

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn build_config(cli: Cli) -> anyhow::Result<BatchConfig> {
    let ambient_fill_alpha = parse_fill_alpha(&cli.fill).context("parse --fill")?;
    let ratio_override = cli
        .ratio
        .as_deref()
        .map(str::parse::<AspectRatio>)
        .transpose()
        .context("parse --ratio")?;
    let watermarks = match &cli.watermarks {
        Some(path) => WatermarkConfig::from_path(path)
            .with_context(|| format!("load watermarks '{}'", path.display()))?,
        None => WatermarkConfig::default(),
    };

    Ok(BatchConfig {
        output_dir: cli.out,
        background: background_color(&cli.color),
        ambient_fill_alpha,
        ratio_override,
        watermarks,
        threads: cli.threads,
        max_size: cli.max_size,
        ..BatchConfig::new(cli.source)
    })
}
