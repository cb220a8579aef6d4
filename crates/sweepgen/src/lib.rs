//! Command-line front end for simulator parameter sweeps
//!
//! This crate wires `sweepgen_core` to the file system and the terminal:
//! - `params` lists the sweepable parameters of a configuration file
//! - `generate` materializes a sweep into a directory tree
//! - `report` converts a simulator report to JSON and optionally stores it
//!
//! Settings live in `~/.sweepgen/config.yaml`, logs in `~/.sweepgen/sweepgen.log`.

pub mod commands;
pub mod logging;
pub mod settings;
pub mod sink;
pub mod util;

pub use commands::Command;
pub use logging::init_logging;
pub use settings::Settings;
pub use sink::{JsonDirectorySink, ResultSink, SinkError};
