//! Sweep planning and combination enumeration.
//!
//! A [`SweepPlan`] collects the parameters the user chose to vary, each with
//! its [`SweepRange`]. [`enumerate`] expands the plan into every
//! [`Combination`](crate::model::Combination) of values, ready to be
//! materialized.
//!
//! ```ignore
//! let mut plan = SweepPlan::new();
//! plan.add(freq, SweepRange::new(2000.0, 3000.0, 500.0)?)?;
//! plan.add(cores, SweepRange::new(1.0, 2.0, 1.0)?)?;
//!
//! // `cores` has fewer values, so it varies slowest
//! let combinations = enumerate(&plan)?;
//! assert_eq!(combinations.len(), 6);
//! ```

mod enumerate;
mod progress;

pub use enumerate::{combination_count, enumerate, sweep_order};
pub use progress::GenerationProgress;

use serde::Serialize;

use crate::catalog::ParameterCatalog;
use crate::error::SweepError;
use crate::model::{QualifiedName, SweepRange};

/// A parameter selected for sweeping together with its range
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub parameter: QualifiedName,
    pub range: SweepRange,
}

impl SweepDefinition {
    pub fn new(parameter: QualifiedName, range: SweepRange) -> Self {
        Self { parameter, range }
    }
}

/// Swept parameters of one configuration section, in the order they were added
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSweep<'a> {
    pub section: &'a str,
    pub definitions: Vec<&'a SweepDefinition>,
}

impl SectionSweep<'_> {
    /// Header line written before this section's overrides
    pub fn header(&self) -> String {
        format!("[{}]", self.section)
    }
}

/// The set of parameters being swept.
///
/// Each parameter appears at most once. Ranges are immutable once added;
/// changing one means removing the parameter and adding it again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepPlan {
    definitions: Vec<SweepDefinition>,
}

impl SweepPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter to the sweep
    pub fn add(&mut self, parameter: QualifiedName, range: SweepRange) -> Result<(), SweepError> {
        if parameter.parameter.trim().is_empty() {
            return Err(SweepError::EmptyParameterName);
        }
        if self.contains(&parameter) {
            return Err(SweepError::DuplicateParameter(parameter));
        }

        self.definitions.push(SweepDefinition::new(parameter, range));
        Ok(())
    }

    /// Add a parameter after checking that the catalog lists it as numeric
    pub fn add_checked(
        &mut self,
        catalog: &ParameterCatalog,
        parameter: QualifiedName,
        range: SweepRange,
    ) -> Result<(), SweepError> {
        if !catalog.contains(&parameter) {
            return Err(SweepError::UnknownParameter(parameter));
        }
        self.add(parameter, range)
    }

    /// Remove a parameter from the sweep, returning its definition
    pub fn remove(&mut self, parameter: &QualifiedName) -> Option<SweepDefinition> {
        let index = self
            .definitions
            .iter()
            .position(|d| &d.parameter == parameter)?;
        Some(self.definitions.remove(index))
    }

    pub fn contains(&self, parameter: &QualifiedName) -> bool {
        self.definitions.iter().any(|d| &d.parameter == parameter)
    }

    pub fn definitions(&self) -> &[SweepDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Catalogued parameters that are not swept yet
    pub fn available(&self, catalog: &ParameterCatalog) -> Vec<QualifiedName> {
        catalog
            .qualified_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Definitions grouped by section.
    ///
    /// Sections appear in the order their first parameter was added; within a
    /// section, parameters keep their add order.
    pub fn by_section(&self) -> Vec<SectionSweep<'_>> {
        let mut groups: Vec<SectionSweep<'_>> = Vec::new();
        for definition in &self.definitions {
            let section = definition.parameter.section.as_str();
            match groups.iter_mut().find(|g| g.section == section) {
                Some(group) => group.definitions.push(definition),
                None => groups.push(SectionSweep {
                    section,
                    definitions: vec![definition],
                }),
            }
        }
        groups
    }

    /// Summary rows for display, one per swept parameter
    pub fn describe(&self) -> Vec<PlanRow> {
        self.definitions
            .iter()
            .map(|d| PlanRow {
                parameter: d.parameter.to_string(),
                min: d.range.min(),
                max: d.range.max(),
                step: d.range.step(),
                iterations: d.range.iteration_count(),
            })
            .collect()
    }
}

/// Display row describing one swept parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub parameter: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub iterations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(section: &str, param: &str) -> QualifiedName {
        QualifiedName::new(section, param)
    }

    fn range(min: f64, max: f64, step: f64) -> SweepRange {
        SweepRange::new(min, max, step).unwrap()
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut plan = SweepPlan::new();
        plan.add(name("core", "frequency"), range(1.0, 2.0, 1.0))
            .unwrap();
        let err = plan
            .add(name("core", "frequency"), range(3.0, 4.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, SweepError::DuplicateParameter(_)));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut plan = SweepPlan::new();
        let err = plan.add(name("core", "  "), range(1.0, 2.0, 1.0)).unwrap_err();
        assert!(matches!(err, SweepError::EmptyParameterName));
    }

    #[test]
    fn test_add_checked_uses_catalog() {
        let catalog = ParameterCatalog::parse("[core]\nfrequency = 2\ntype = rob\n");
        let mut plan = SweepPlan::new();

        plan.add_checked(&catalog, name("core", "frequency"), range(1.0, 2.0, 1.0))
            .unwrap();
        let err = plan
            .add_checked(&catalog, name("core", "type"), range(1.0, 2.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, SweepError::UnknownParameter(_)));
    }

    #[test]
    fn test_remove_then_re_add() {
        let mut plan = SweepPlan::new();
        let freq = name("core", "frequency");
        plan.add(freq.clone(), range(1.0, 2.0, 1.0)).unwrap();

        let removed = plan.remove(&freq).unwrap();
        assert_eq!(removed.range.max(), 2.0);
        assert!(plan.is_empty());
        assert!(plan.remove(&freq).is_none());

        plan.add(freq.clone(), range(5.0, 9.0, 2.0)).unwrap();
        assert_eq!(plan.definitions()[0].range.max(), 9.0);
    }

    #[test]
    fn test_available_excludes_swept() {
        let catalog = ParameterCatalog::parse("[core]\nfrequency = 2\nwidth = 4\n[l1]\nsize = 32\n");
        let mut plan = SweepPlan::new();
        plan.add(name("core", "width"), range(1.0, 2.0, 1.0)).unwrap();

        let available: Vec<String> = plan
            .available(&catalog)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(available, vec!["[core]/frequency", "[l1]/size"]);
    }

    #[test]
    fn test_by_section_groups_in_add_order() {
        let mut plan = SweepPlan::new();
        plan.add(name("l1", "size"), range(1.0, 2.0, 1.0)).unwrap();
        plan.add(name("core", "frequency"), range(1.0, 2.0, 1.0))
            .unwrap();
        plan.add(name("l1", "assoc"), range(1.0, 2.0, 1.0)).unwrap();

        let groups = plan.by_section();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].section, "l1");
        assert_eq!(groups[0].header(), "[l1]");
        assert_eq!(
            groups[0]
                .definitions
                .iter()
                .map(|d| d.parameter.parameter.as_str())
                .collect::<Vec<_>>(),
            vec!["size", "assoc"]
        );
        assert_eq!(groups[1].section, "core");
    }

    #[test]
    fn test_describe() {
        let mut plan = SweepPlan::new();
        plan.add(name("core", "frequency"), range(3000.0, 3200.0, 100.0))
            .unwrap();
        let rows = plan.describe();
        assert_eq!(rows[0].parameter, "[core]/frequency");
        assert_eq!(rows[0].iterations, 3);
    }
}
