//! Panelform AEP - Africa Energy Portal indicator pipeline
//!
//! Reshapes scraped per-indicator JSON exports into a dense wide-panel CSV:
//! one row per logical time series, one column per calendar year 2000-2022,
//! with missing years reconstructed by zero-fill and linear interpolation.
//!
//! # Example
//!
//! ```ignore
//! use panelform_aep::{Config, run};
//!
//! let config = Config {
//!     input_dir: "scraped_json".into(),
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, &Default::default())?;
//! println!("Wrote {} series", summary.series_written);
//! ```

pub mod config;
pub mod fill;
pub mod ingest;
pub mod pivot;
pub mod runner;
pub mod schema;
pub mod serial;
pub mod tidy;
pub mod writer;

// Re-exports
pub use config::Config;
pub use runner::{Summary, run};
