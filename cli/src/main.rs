//! Formcraft CLI
//!
//! Command-line front end for the Formcraft form builder.
//!
//! # Usage
//!
//! ```bash
//! formcraft forms import -f contact.yaml
//! formcraft forms list
//! formcraft fill <id> --set Email=me@example.com --set Age=30
//! formcraft forms show <id> --format yaml
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formcraft")]
#[command(author = "Formcraft")]
#[command(version)]
#[command(about = "Formcraft Command Line Interface", long_about = None)]
struct Cli {
    /// Path of the form store file
    #[arg(long, env = "FORMCRAFT_STORE")]
    store: Option<PathBuf>,

    /// Output format
    #[arg(long, short, env = "FORMCRAFT_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, env = "FORMCRAFT_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved forms
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Fill a saved form and submit it
    Fill {
        /// Form id
        id: String,
        /// Field assignment as `<field>=<value>`, field given by id or label
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// List saved forms
    List,
    /// Show a form with its fields
    Show { id: String },
    /// Delete a saved form
    Delete { id: String },
    /// Build and save a form from a YAML or JSON draft
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    let config = match config::Config::load(profile) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Config unreadable, using defaults");
            config::Config::default()
        }
    };
    let format = cli
        .format
        .or_else(|| config.default_format.as_deref().and_then(output::OutputFormat::parse))
        .unwrap_or_default();

    let result = match cli.command {
        Commands::Forms { action } => config
            .resolve_store_path(cli.store)
            .and_then(|path| commands::forms::handle(action, &path, format)),
        Commands::Fill { id, assignments } => config
            .resolve_store_path(cli.store)
            .and_then(|path| commands::fill::handle(&id, &assignments, &path, format)),
        Commands::Config { action } => commands::config::handle(action, profile),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
