//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use commands::{CheckTagArgs, HistoryArgs, ImportArgs, TemplateArgs};

#[derive(Debug, Parser)]
#[command(
    name = "asset-import",
    version,
    about = "Bulk-import assets from spreadsheets into the asset service"
)]
pub struct Cli {
    /// Path to config.toml (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Asset service base URL
    #[arg(long, env = "ASSET_IMPORT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the asset service
    #[arg(long, env = "ASSET_IMPORT_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import assets from an .xlsx, .xls or .csv file
    Import(ImportArgs),
    /// Generate a blank import template
    Template(TemplateArgs),
    /// Show past import runs
    History(HistoryArgs),
    /// Check whether an asset tag is already taken
    CheckTag(CheckTagArgs),
}

impl Cli {
    /// Load the config file and apply command-line and environment overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(url) = &self.api_url {
            config.api.base_url = Some(url.clone());
        }
        if let Some(token) = &self.api_token {
            config.api.token = Some(token.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.load_config()?;

    match cli.command {
        Commands::Import(args) => commands::import::handle_import_command(args, &config).await,
        Commands::Template(args) => commands::template::handle_template_command(args),
        Commands::History(args) => commands::history::handle_history_command(args, &config).await,
        Commands::CheckTag(args) => commands::check_tag::handle_check_tag_command(args, &config).await,
    }
}
