//! `check-tag` command

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::AssetApiClient;
use crate::config::Config;
use crate::import::AssetStore;

#[derive(Debug, Args)]
pub struct CheckTagArgs {
    /// Asset tag to look up
    pub tag: String,
}

pub async fn handle_check_tag_command(args: CheckTagArgs, config: &Config) -> Result<()> {
    let tag = args.tag.trim();
    if tag.is_empty() {
        anyhow::bail!("Asset tag must not be blank");
    }

    let client = AssetApiClient::from_config(config)?;
    let exists = client
        .exists(tag)
        .await
        .with_context(|| format!("Failed to check asset tag '{}'", tag))?;

    if exists {
        println!("{} {} is already in use", "✗".red(), tag.bold());
    } else {
        println!("{} {} is available", "✓".green(), tag.bold());
    }
    Ok(())
}
