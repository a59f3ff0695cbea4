//! panelform - CLI for the Africa Energy Portal reshape pipeline
//!
//! Turns a directory of scraped indicator JSON exports into a dense
//! wide-panel CSV (one row per time series, one column per year 2000-2022).

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "panelform")]
#[command(about = "Reshape scraped indicator JSON into a dense wide-panel CSV")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./panelform.toml or ~/.config/panelform/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the reshape pipeline
    Run(cmd::run::RunArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(panelform_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — progress bars show activity
    //   non-TTY: info unless --debug          — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    panelform_core::init_logging(quiet, cli.debug, multi);

    // Load configuration
    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Run(args) => cmd::run::run(args, &config, &progress),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Input directory",
                &config.input.dir.display().to_string(),
            ]);
            table.add_row(vec!["Output path", &config.output.path.display().to_string()]);
            table.add_row(vec!["Source link", &config.portal.source_link]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
