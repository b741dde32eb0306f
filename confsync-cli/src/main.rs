use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::DRY_RUN_LOG_FILE;

#[derive(Parser, Debug)]
#[command(name = "confsync")]
#[command(about = "Migrate monitoring-backend configuration between instances")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Set the logging level
    #[arg(long, global = true, value_enum, default_value = "INFO", ignore_case = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export configuration from the source backend
    Export {
        /// The configuration type to export, or "all" for every registered type
        #[arg(long = "type")]
        config_type: String,

        /// Directory to store exported files
        #[arg(long, default_value = "export")]
        export_dir: PathBuf,
    },

    /// Import configuration to the destination backend
    Import {
        /// The configuration type to import, or "all" for every registered type
        #[arg(long = "type")]
        config_type: String,

        /// Directory to read exported files from
        #[arg(long, default_value = "export")]
        export_dir: PathBuf,

        /// Simulate the import without making any changes
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "UPPER")]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "error",
        }
    }
}

fn init_logging(level: LogLevel, dry_run_log: Option<File>) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| level.as_filter().to_string()),
    );

    // Duplicate all output to the dry-run log file for later review
    let file_layer = dry_run_log.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Arc::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = confsync::MigratorConfig::load(&cli.config)?;

    match cli.command {
        Commands::Export {
            config_type,
            export_dir,
        } => commands::export::run(&config, &config_type, &export_dir).await,
        Commands::Import {
            config_type,
            export_dir,
            dry_run,
        } => commands::import::run(&config, &config_type, &export_dir, dry_run).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let dry_run_log = match &cli.command {
        Commands::Import { dry_run: true, .. } => {
            println!(
                "Dry run is enabled. Output will be logged to the console and to '{}'.",
                DRY_RUN_LOG_FILE
            );
            match File::create(DRY_RUN_LOG_FILE) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("Cannot create '{}': {}", DRY_RUN_LOG_FILE, e);
                    std::process::exit(1);
                }
            }
        }
        _ => None,
    };

    init_logging(cli.log_level, dry_run_log);

    if let Err(e) = run(cli).await {
        tracing::error!("An error occurred: {:#}", e);
        std::process::exit(1);
    }
}
