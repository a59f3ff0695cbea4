//! AEP pipeline configuration

use std::path::PathBuf;

/// Runtime configuration for the AEP reshape pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of scraped `*.json` indicator exports
    pub input_dir: PathBuf,
    /// Output CSV path
    pub output_path: PathBuf,
    /// Constant attached to every row's `source_link` column
    pub source_link: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("scraped_json"),
            output_path: PathBuf::from("aep_preprocessed_wide_2000_2022.csv"),
            source_link: "https://africa-energy-portal.org/database".to_string(),
        }
    }
}
