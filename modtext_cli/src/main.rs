//! Print rendered modifier text for mods in the loaded content.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use modtext_core::{Config, Modifier};
use std::path::PathBuf;

/// Render modifier descriptions from stat translation data
#[derive(Parser)]
#[command(name = "modtext")]
#[command(about = "Render modifier text from stat translations", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file pointing at the translation and mod data
    #[arg(short, long, default_value = "modtext.toml")]
    config: PathBuf,

    /// Display language, overriding the settings file
    #[arg(short, long)]
    language: Option<String>,

    /// Show this text in place of numbers
    #[arg(short, long)]
    placeholder: Option<String>,

    /// Modifier to describe (the lowest tier when a second id is given)
    mod_id: String,

    /// Highest tier of the same modifier, to describe the full range
    high_tier_mod_id: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let mut translator = config.translator();
    if let Some(language) = &cli.language {
        translator = translator.with_language(language.clone());
    }
    let placeholder = cli
        .placeholder
        .as_deref()
        .or(config.settings.placeholder.as_deref());

    let low = find_mod(&config, &cli.mod_id)?;
    let lines = match &cli.high_tier_mod_id {
        Some(high_id) => translator.translate_range(low, find_mod(&config, high_id)?),
        None => translator.translate_with_placeholder(low, None, placeholder),
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn find_mod<'a>(config: &'a Config, id: &str) -> Result<&'a Modifier> {
    config
        .mods
        .get(id)
        .ok_or_else(|| anyhow!("unknown modifier: {}", id))
}
