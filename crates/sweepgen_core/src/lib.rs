//! Parameter sweep generation for simulator configuration files
//!
//! This crate turns one base simulator configuration into a directory tree of
//! concrete configurations, one per point of a Cartesian parameter sweep, and
//! parses the simulator's tabular text report into structured data.
//! It supports:
//! - Discovering sweepable (numeric) parameters per section of an INI-like file
//! - Validated sweep ranges with clamped bounds and a minimum step
//! - Deterministic combination enumeration ordered by range size
//! - Materializing `<base>/<param>_<value>/.../config.cfg` trees
//! - Parsing `sim.out` style reports into ordered, JSON-serializable maps
//!
//! # Example
//!
//! ```ignore
//! use sweepgen_core::{ParameterCatalog, QualifiedName, SweepPlan, SweepRange, generate};
//!
//! let text = std::fs::read_to_string("base.cfg")?;
//! let catalog = ParameterCatalog::parse(&text);
//!
//! let mut plan = SweepPlan::new();
//! plan.add_checked(
//!     &catalog,
//!     "[perf_model/core]/frequency".parse::<QualifiedName>()?,
//!     SweepRange::new(2000.0, 3000.0, 500.0)?,
//! )?;
//!
//! let summary = generate(&plan, &text, Path::new("custom-config-files"), None)?;
//! println!("wrote {} configurations", summary.written);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod materialize;
pub mod report;
pub mod sweep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use catalog::ParameterCatalog;
pub use error::{Result, SweepError};
pub use materialize::{
    CONFIG_FILE_NAME, GenerationSummary, generate, leaf_dir, materialize, parse_leaf_dir,
    render_config,
};
pub use model::{Assignment, Combination, QualifiedName, SweepRange};
pub use report::{ColumnValues, ReportValue, SimReport};
pub use sweep::{
    GenerationProgress, PlanRow, SectionSweep, SweepDefinition, SweepPlan, combination_count,
    enumerate, sweep_order,
};
