use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Args;
use color_eyre::eyre::WrapErr;
use sweepgen_core::{
    GenerationProgress, GenerationSummary, ParameterCatalog, QualifiedName, SweepPlan, SweepRange,
    combination_count, generate,
};
use thiserror::Error;

use super::Context;

const PROGRESS_POLL: Duration = Duration::from_millis(250);

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Base configuration file
    pub config: PathBuf,

    /// Parameter to sweep, as `[section]/name=MIN:MAX[:STEP]` (repeatable)
    #[arg(short, long = "sweep", value_name = "SPEC", required = true)]
    pub sweeps: Vec<SweepSpec>,

    /// Output directory (overrides `output_dir` in config.yaml)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the plan and combination count without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Error)]
pub enum SweepSpecError {
    #[error("expected NAME=MIN:MAX[:STEP], got `{0}`")]
    Format(String),
    #[error("invalid number `{0}`")]
    Number(String),
    #[error(transparent)]
    Name(#[from] sweepgen_core::SweepError),
}

/// One `--sweep` argument before the default step is applied
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpec {
    pub parameter: QualifiedName,
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl SweepSpec {
    pub fn range(&self, default_step: f64) -> sweepgen_core::Result<SweepRange> {
        SweepRange::new(self.min, self.max, self.step.unwrap_or(default_step))
    }
}

impl FromStr for SweepSpec {
    type Err = SweepSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, bounds) = s
            .rsplit_once('=')
            .ok_or_else(|| SweepSpecError::Format(s.to_string()))?;

        let number = |field: &str| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|_| SweepSpecError::Number(field.trim().to_string()))
        };

        let fields: Vec<&str> = bounds.split(':').collect();
        let (min, max, step) = match fields.as_slice() {
            [min, max] => (number(*min)?, number(*max)?, None),
            [min, max, step] => (number(*min)?, number(*max)?, Some(number(*step)?)),
            _ => return Err(SweepSpecError::Format(s.to_string())),
        };

        Ok(Self {
            parameter: name.trim().parse()?,
            min,
            max,
            step,
        })
    }
}

/// Build a plan from command-line sweeps, checking each against the catalog
pub fn build_plan(
    catalog: &ParameterCatalog,
    sweeps: &[SweepSpec],
    default_step: f64,
) -> sweepgen_core::Result<SweepPlan> {
    let mut plan = SweepPlan::new();
    for spec in sweeps {
        let range = spec.range(default_step)?;
        plan.add_checked(catalog, spec.parameter.clone(), range)?;
    }
    Ok(plan)
}

/// Plan rows followed by the combination count
pub fn render_plan(plan: &SweepPlan) -> sweepgen_core::Result<String> {
    let mut out = String::new();
    for row in plan.describe() {
        out.push_str(&format!(
            "{}  {} .. {} step {}  ({} values)\n",
            row.parameter, row.min, row.max, row.step, row.iterations
        ));
    }
    out.push_str(&format!("{} combinations\n", combination_count(plan)?));
    Ok(out)
}

/// Raises the poller's stop flag when dropped, including during unwinding
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Run `work` while a scoped thread logs `progress`. The poller stops when
/// `work` returns or panics.
fn with_progress_log<T>(progress: &GenerationProgress, work: impl FnOnce() -> T) -> T {
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        scope.spawn(|| {
            let mut last = 0;
            while !done.load(Ordering::Relaxed) {
                std::thread::sleep(PROGRESS_POLL);
                let completed = progress.completed();
                if completed != last {
                    tracing::info!(completed, total = progress.total(), "generation progress");
                    last = completed;
                }
            }
        });

        let _stop = StopOnDrop(&done);
        work()
    })
}

fn render_summary(summary: &GenerationSummary, base_dir: &std::path::Path) -> String {
    format!(
        "Wrote {} configuration files under {}\n",
        summary.written,
        base_dir.display()
    )
}

pub fn run(args: &GenerateArgs, ctx: &Context) -> color_eyre::Result<String> {
    let base_text = super::read_text(&args.config)?;
    let catalog = ParameterCatalog::parse(&base_text);

    let plan = build_plan(&catalog, &args.sweeps, ctx.settings.default_step)
        .wrap_err("invalid sweep")?;

    let plan_text = render_plan(&plan).wrap_err("invalid sweep")?;
    if args.dry_run {
        return Ok(plan_text);
    }

    let base_dir = args
        .out
        .clone()
        .unwrap_or_else(|| ctx.settings.output_dir(&ctx.data_dir));

    let progress = GenerationProgress::new();
    let summary = with_progress_log(&progress, || {
        generate(&plan, &base_text, &base_dir, Some(&progress))
    })
    .wrap_err_with(|| format!("failed to generate sweep under {}", base_dir.display()))?;

    let mut out = plan_text;
    out.push_str(&render_summary(&summary, &base_dir));
    Ok(out)
}
