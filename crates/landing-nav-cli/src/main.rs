use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use landing_nav_core::PageConfig;

mod commands;

#[derive(Parser)]
#[command(name = "landing-nav")]
#[command(author, version, about = "Simulate the landing page navigation controller")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/landing-nav/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a scenario and report navigation state changes
    Simulate {
        /// Scenario file describing the page layout
        #[arg(short = 's', long)]
        scenario: PathBuf,
        /// Final scroll offset (defaults to the bottom of the page)
        #[arg(long)]
        to: Option<f64>,
        /// Pixels scrolled per step
        #[arg(long, default_value_t = 10.0)]
        step: f64,
        /// Emit one JSON object per step instead of text
        #[arg(long)]
        json: bool,
    },
    /// Click an in-page anchor and play the scroll animation
    Anchor {
        /// Scenario file describing the page layout
        #[arg(short = 's', long)]
        scenario: PathBuf,
        /// Anchor href, e.g. "#pricing"
        #[arg(short = 't', long)]
        target: String,
        /// Scroll offset before the click
        #[arg(long, default_value_t = 0.0)]
        from: f64,
    },
    /// Print or write the default configuration
    Config {
        /// Write the defaults to the configuration path instead of printing them
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(PageConfig::config_path);
    let config = PageConfig::load(&config_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            to,
            step,
            json,
        } => commands::simulate::run(config, &scenario, to, step, json),
        Commands::Anchor {
            scenario,
            target,
            from,
        } => commands::anchor::run(config, &scenario, &target, from).await,
        Commands::Config { write } => commands::config::run(&config_path, write),
    }
}
