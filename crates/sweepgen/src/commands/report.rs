use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{WrapErr, bail};
use sweepgen_core::SimReport;

use super::Context;
use crate::sink::{JsonDirectorySink, ResultSink};
use crate::util::atomic_write;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Simulator report (usually `sim.out`)
    pub input: PathBuf,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also store the document in the results directory
    #[arg(long)]
    pub save: bool,

    /// Run label for saved documents (default: the parent directory name)
    #[arg(long, requires = "save")]
    pub label: Option<String>,
}

/// Label for a saved run. A `sim.out` sits in the leaf directory of its
/// configuration, so the directory name is the most useful default.
fn default_label(input: &std::path::Path) -> String {
    input
        .parent()
        .and_then(|p| p.file_name())
        .or_else(|| input.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string())
}

pub fn run(args: &ReportArgs, ctx: &Context) -> color_eyre::Result<String> {
    let text = super::read_text(&args.input)?;
    let report = SimReport::parse(&text);

    if report.is_empty() {
        bail!("no metrics found in {}", args.input.display());
    }

    tracing::info!(
        input = %args.input.display(),
        metrics = report.len(),
        columns = report.expected_columns().unwrap_or(0),
        "parsed report"
    );

    let mut json = report.to_json_pretty()?;
    json.push('\n');

    if args.save {
        let sink = JsonDirectorySink::new(ctx.settings.results_dir(&ctx.data_dir));
        let label = args
            .label
            .clone()
            .unwrap_or_else(|| default_label(&args.input));
        let path = sink.save(&label, &report)?;
        // stdout may be carrying the JSON document
        eprintln!("Saved {}", path.display());
    }

    match &args.output {
        Some(path) => {
            atomic_write(path, &json)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            Ok(format!("Wrote {}\n", path.display()))
        }
        None => Ok(json),
    }
}
