//! compass-cli - Command-line interface for E5 Compass
//!
//! Subcommands cover the full report lifecycle: `generate` runs the AI
//! fan-out over a questionnaire file, `export` renders a report
//! document to PDF and/or PPTX, `lookup` searches Companies House,
//! and `sections`/`models` list the available catalog entries.

pub mod app;

pub use app::run;
