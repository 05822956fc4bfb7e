use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wayscan::caption::{CaptionConfig, CaptionService};
use wayscan::report::FailureReport;
use wayscan::upload::UploadPolicy;
use wayscan_cv::{NavigatorConfig, ObstacleNavigator, RenderVariant};

/// Single-frame obstacle detection and steering hint
#[derive(Debug, Parser)]
#[command(name = "wayscan", version)]
struct Cli {
    /// PNG or JPEG frame to analyze
    image: PathBuf,

    /// JSON navigator configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for annotated frames
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Annotation strategy: trace (default) or highlight
    #[arg(long)]
    renderer: Option<RenderVariant>,

    /// Question for the scene description service
    #[arg(long)]
    prompt: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn load_config(cli: &Cli) -> Result<NavigatorConfig> {
    let mut config = match &cli.config {
        Some(path) => NavigatorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => NavigatorConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(variant) = cli.renderer {
        config.render.variant = variant;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;
    let navigator = ObstacleNavigator::new(config)?;

    let captions = CaptionService::new(CaptionConfig::new(std::env::var("GOOGLE_API_KEY").ok()));
    let policy = UploadPolicy::default();

    let report = wayscan::analyze_upload(&navigator, &captions, &policy, &cli.image, cli.prompt.as_deref())?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    json.context("Failed to serialize report")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("{e:#}");
            let failure = FailureReport::new(format!("{e:#}"));
            match serde_json::to_string(&failure) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("Detection failed: {e:#}"),
            }
            std::process::exit(1);
        }
    }
}
