//! Subcommand handlers.
//!
//! Handlers return the text to print so they can be exercised in tests
//! without capturing stdout.

pub mod generate;
pub mod params;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use color_eyre::eyre::WrapErr;

pub use generate::{GenerateArgs, SweepSpec};
pub use params::ParamsArgs;
pub use report::ReportArgs;

use crate::settings::Settings;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the numeric parameters of a configuration file
    Params(ParamsArgs),
    /// Materialize a sweep into a directory tree of configuration files
    Generate(GenerateArgs),
    /// Convert a simulator report (sim.out) to JSON
    Report(ReportArgs),
}

/// Everything a handler needs besides its own arguments
pub struct Context {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl Command {
    pub fn run(self, ctx: &Context) -> color_eyre::Result<String> {
        match self {
            Command::Params(args) => params::run(&args),
            Command::Generate(args) => generate::run(&args, ctx),
            Command::Report(args) => report::run(&args, ctx),
        }
    }
}

fn read_text(path: &Path) -> color_eyre::Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
