//! Writing one configuration file per combination.
//!
//! Output layout, with parameters nested in enumeration order:
//!
//! ```text
//! <base>/
//!   cores_1/
//!     frequency_2000/config.cfg
//!     frequency_2500/config.cfg
//!   cores_2/
//!     ...
//! ```
//!
//! Each `config.cfg` is the base configuration followed by override blocks
//! for the swept sections. Runs are not transactional: a failure leaves the
//! files written so far in place. Two runs against the same base directory
//! at once race on directory creation and overwrite each other's files, so
//! callers must serialize them.

use std::fs;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Result, SweepError};
use crate::model::{Combination, QualifiedName, format_value};
use crate::sweep::{GenerationProgress, SectionSweep, SweepPlan, enumerate};

/// File name written inside every leaf directory
pub const CONFIG_FILE_NAME: &str = "config.cfg";

/// Outcome of a completed generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// Number of configuration files written
    pub written: usize,
    /// Leaf directories in the order they were written
    pub leaf_dirs: Vec<PathBuf>,
}

/// Directory for a combination: one `<parameter>_<value>` segment per assignment
pub fn leaf_dir(base: &Path, combination: &Combination) -> PathBuf {
    let mut path = base.to_path_buf();
    for assignment in combination {
        path.push(assignment.segment());
    }
    path
}

/// Decode a leaf directory produced by [`leaf_dir`] back into
/// `(parameter, value)` pairs.
///
/// Parameter names may contain underscores, so each segment is split at its
/// last `_`. Returns `None` if `leaf` is not under `base` or a segment does
/// not decode.
pub fn parse_leaf_dir(base: &Path, leaf: &Path) -> Option<Vec<(String, f64)>> {
    let relative = leaf.strip_prefix(base).ok()?;
    relative
        .components()
        .map(|component| match component {
            Component::Normal(segment) => {
                let (name, value) = segment.to_str()?.rsplit_once('_')?;
                let value: f64 = value.parse().ok()?;
                (!name.is_empty() && value.is_finite()).then(|| (name.to_string(), value))
            }
            _ => None,
        })
        .collect()
}

/// Render the configuration text for one combination.
///
/// The result is the untouched base text, a newline, then for every section
/// with at least one parameter in `combination` a blank line, the section
/// header and one `name = value` line per swept parameter in the section's
/// order.
pub fn render_config(
    base_text: &str,
    combination: &Combination,
    sections: &[SectionSweep<'_>],
) -> String {
    let values: FxHashMap<&QualifiedName, f64> = combination
        .iter()
        .map(|a| (&a.parameter, a.value))
        .collect();

    let mut content = String::with_capacity(base_text.len() + 64 * combination.len());
    content.push_str(base_text);
    content.push('\n');

    for section in sections {
        let lines: Vec<String> = section
            .definitions
            .iter()
            .filter_map(|d| {
                values
                    .get(&d.parameter)
                    .map(|v| format!("{} = {}\n", d.parameter.parameter, format_value(*v)))
            })
            .collect();

        if lines.is_empty() {
            continue;
        }

        content.push('\n');
        content.push_str(&section.header());
        content.push('\n');
        for line in lines {
            content.push_str(&line);
        }
    }

    content
}

/// Write one configuration file per combination under `base_dir`.
///
/// Stops at the first I/O failure and reports the path that failed; earlier
/// files are not rolled back. When `progress` is given it is updated after
/// every file and checked for cancellation before every combination.
pub fn materialize(
    combinations: &[Combination],
    sections: &[SectionSweep<'_>],
    base_dir: &Path,
    base_text: &str,
    progress: Option<&GenerationProgress>,
) -> Result<GenerationSummary> {
    let total = combinations.len();
    if let Some(p) = progress {
        p.start(total);
    }

    let mut summary = GenerationSummary {
        written: 0,
        leaf_dirs: Vec::with_capacity(total),
    };

    for combination in combinations {
        if progress.is_some_and(GenerationProgress::is_cancelled) {
            tracing::info!(
                completed = summary.written,
                total,
                "generation cancelled"
            );
            return Err(SweepError::Cancelled {
                completed: summary.written,
                total,
            });
        }

        let dir = leaf_dir(base_dir, combination);
        fs::create_dir_all(&dir).map_err(|e| SweepError::io(&dir, e))?;

        let file = dir.join(CONFIG_FILE_NAME);
        let content = render_config(base_text, combination, sections);
        fs::write(&file, content).map_err(|e| SweepError::io(&file, e))?;

        tracing::debug!(path = %file.display(), "wrote configuration");

        summary.written += 1;
        summary.leaf_dirs.push(dir);
        if let Some(p) = progress {
            p.increment();
        }
    }

    Ok(summary)
}

/// Plan-level entry point: validate, enumerate and materialize.
///
/// Creates `base_dir` if needed. An empty plan is rejected before anything
/// touches the file system, and an empty Cartesian product is reported as
/// [`SweepError::NoCombinations`] rather than as an empty success. A product
/// too large to hold fails with [`SweepError::TooManyCombinations`], also
/// before any directory is created.
pub fn generate(
    plan: &SweepPlan,
    base_text: &str,
    base_dir: &Path,
    progress: Option<&GenerationProgress>,
) -> Result<GenerationSummary> {
    if plan.is_empty() {
        return Err(SweepError::NoParameters);
    }

    let combinations = enumerate(plan)?;
    if combinations.is_empty() {
        return Err(SweepError::NoCombinations);
    }

    fs::create_dir_all(base_dir).map_err(|e| SweepError::io(base_dir, e))?;

    tracing::info!(
        parameters = plan.len(),
        combinations = combinations.len(),
        base_dir = %base_dir.display(),
        "materializing sweep"
    );

    let sections = plan.by_section();
    let summary = materialize(&combinations, &sections, base_dir, base_text, progress)?;

    tracing::info!(written = summary.written, "sweep materialized");
    Ok(summary)
}
