//! Panelform Core - Common infrastructure for panel data pipelines
//!
//! This crate provides the logging and progress-reporting components shared
//! by the pipeline crates and the CLI.

pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress};
