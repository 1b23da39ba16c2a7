use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use mollysql::{Database, EngineConfig};

mod cli;

/// Interactive SQL shell over an in-memory mollysql database.
#[derive(Parser, Debug)]
#[command(name = "mollysql", version, about = "In-memory SQL engine shell")]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", env = "MOLLYSQL_LOG_LEVEL")]
    log_level: String,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match &args.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load config file");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(toml) => {
                println!("{}", toml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to render config");
                ExitCode::FAILURE
            }
        };
    }

    let database = Database::open(config);
    let mut session = database.open_session();
    match cli::cli(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Shell terminated");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("mollysql={level}")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
