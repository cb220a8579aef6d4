use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use sweepgen::commands::Context;
use sweepgen::{Command, Settings, init_logging};

#[derive(Parser, Debug)]
#[command(name = "sweepgen")]
#[command(about = "Generate parameter-sweep configurations for a multicore simulator")]
struct Args {
    /// Path to the data directory (default: ~/.sweepgen/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Mirror log events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(Settings::default_data_dir);

    init_logging(&data_dir, &args.log_level, args.verbose)?;

    let settings = Settings::load_or_init(&data_dir)
        .wrap_err_with(|| format!("failed to load settings from {}", data_dir.display()))?;

    let ctx = Context { data_dir, settings };
    let output = args.command.run(&ctx)?;
    print!("{output}");

    tracing::info!("sweepgen finished");
    Ok(())
}
