//! Run subcommand - execute the reshape pipeline

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use panelform_core::SharedProgress;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory of scraped *.json indicator exports
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    // Config file supplies defaults, CLI flags override
    let pipeline_config = panelform_aep::Config {
        input_dir: args.input.unwrap_or_else(|| config.input.dir.clone()),
        output_path: args.output.unwrap_or_else(|| config.output.path.clone()),
        source_link: config.portal.source_link.clone(),
    };

    let summary = panelform_aep::run(&pipeline_config, progress)?;

    println!();
    println!("=== Reshape Summary ===");
    println!("Files read: {}", summary.files_read);
    println!(
        "Observations: {} across {} countries",
        summary.observations, summary.countries
    );
    println!(
        "Series written: {} -> {}",
        summary.series_written,
        pipeline_config.output_path.display()
    );
    println!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(())
}
