mod analyze_cmd;
mod config_cmd;
mod terminal_output;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use analyze_cmd::{AnalyzeInput, OutputFormat};
use nutriscan_config::{config_dir, config_file_path, load_and_prepare, load_with_report};
use nutriscan_gateway::{start_server, GatewayState};
use nutriscan_logging::init_logger;

#[derive(Parser)]
#[command(name = "nutriscan")]
#[command(about = "NutriScan: nutrition label extraction and reference daily value analysis")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.nutriscan/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a label locally and print the result
    Analyze(AnalyzeArgs),
    /// Validate the configuration file
    CheckConfig,
}

#[derive(Args)]
#[group(required = true, multiple = false, id = "input")]
struct InputArgs {
    /// Recognized label text
    #[arg(long)]
    text: Option<String>,
    /// File containing recognized label text
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Label photo to send to the OCR service
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,
    /// male or female (default: male)
    #[arg(short, long)]
    gender: Option<String>,
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

impl InputArgs {
    fn into_input(self) -> Option<AnalyzeInput> {
        self.text
            .map(AnalyzeInput::Text)
            .or(self.text_file.map(AnalyzeInput::TextFile))
            .or(self.image.map(AnalyzeInput::Image))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Serve { port } => serve(&config_path, port).await,
        Commands::Analyze(args) => {
            let _guard = init_logger("warn", None, false);
            let config = load_and_prepare(&config_path).await?;
            let input = args
                .input
                .into_input()
                .context("one of --text, --text-file or --image is required")?;
            let response = analyze_cmd::run(&config, input, args.gender.as_deref()).await?;
            println!("{}", analyze_cmd::render(&response, args.format)?);
            if analyze_cmd::is_failure(&response) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::CheckConfig => {
            let report = config_cmd::run(&config_path).await?;
            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let (config, report) = load_with_report(config_path).await?;
    let log_dir = config.log_dir().map(PathBuf::from);
    let _guard = init_logger(config.log_level(), log_dir.as_deref(), config.log_json());

    info!(path = %config_path.display(), "Loaded config");
    report.log();
    report
        .ensure_valid()
        .context("Refusing to start with an invalid config; run `nutriscan check-config`")?;

    let port = port.unwrap_or(config.port());
    let addr: SocketAddr = format!("{}:{}", config.bind_address(), port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}:{}", config.bind_address(), port))?;

    info!(
        addr = %addr,
        config = %config_path.display(),
        substitution = ?config.substitution(),
        "Starting NutriScan"
    );

    let state = GatewayState::from_config(&config)?;
    start_server(addr, state).await
}
