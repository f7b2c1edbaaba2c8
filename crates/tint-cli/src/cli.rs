use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tint_state::PaletteConfig;

use crate::commands::{
    ColorArgs, PaletteArgs, SchemeArgs, TokensArgs, run_dark, run_foreground, run_palette,
    run_scheme, run_strategies, run_tokens,
};
use crate::error::Result;
use crate::logging::init_tracing;

#[derive(Debug, Parser)]
#[command(
    name = "tint",
    about = "Generate harmonious color palettes and contrast-checked theme tokens",
    version
)]
pub struct Cli {
    /// Config file; `.json` is read as JSON, anything else as TOML.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `tint_state=trace`.
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Emit JSON output and JSON error reports.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List harmony strategies.
    Strategies,

    /// Generate a six-role scheme with light and dark values.
    Scheme(SchemeArgs),

    /// Print the dark-mode counterpart of a color.
    Dark(ColorArgs),

    /// Pick a readable text color for a background.
    Foreground(ColorArgs),

    /// Derive theme tokens for a palette.
    Tokens(TokensArgs),

    /// Build a palette and apply lock, regenerate and resize steps.
    Palette(PaletteArgs),
}

fn load_config(path: Option<&Path>) -> Result<PaletteConfig> {
    match path {
        Some(path) => Ok(PaletteConfig::load(path)?),
        None => Ok(PaletteConfig::default()),
    }
}

/// Binary entry: load config, install logging, run against stdout.
pub fn launch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(cli.log.as_deref(), config.log.filter.as_deref())?;
    let stdout = std::io::stdout();
    execute(&cli, &config, &mut stdout.lock())
}

/// Run without touching the global subscriber.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    run_to(cli, &mut stdout.lock())
}

/// Run, writing command output to `out`.
pub fn run_to(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    execute(&cli, &config, out)
}

fn execute(cli: &Cli, config: &PaletteConfig, out: &mut dyn Write) -> Result<()> {
    let _span = tracing::debug_span!("tint.command", json = cli.json).entered();
    match &cli.command {
        Commands::Strategies => run_strategies(cli.json, out),
        Commands::Scheme(args) => run_scheme(args, config, cli.json, out),
        Commands::Dark(args) => run_dark(args, cli.json, out),
        Commands::Foreground(args) => run_foreground(args, cli.json, out),
        Commands::Tokens(args) => run_tokens(args, config, cli.json, out),
        Commands::Palette(args) => run_palette(args, config, cli.json, out),
    }
}
