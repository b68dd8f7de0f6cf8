use clap::{Parser, Subcommand};
use fastlog_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fastlog-cli", version, about = "fastlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Active fast control
    Fast {
        #[command(subcommand)]
        action: commands::fast::FastAction,
    },
    /// Completed fast history
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Fast statistics and chart data
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let config = match loaded {
        Ok(config) => {
            init_tracing(&config.log.filter);
            config
        }
        Err(e) => {
            let config = Config::default();
            init_tracing(&config.log.filter);
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config
        }
    };

    let result = match cli.command {
        Commands::Fast { action } => commands::fast::run(action, &config),
        Commands::Log { action } => commands::log::run(action, &config),
        Commands::Stats { action } => commands::stats::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
