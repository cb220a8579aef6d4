//! Discovery of sweepable parameters in a simulator configuration file
//!
//! Configuration files are INI-like:
//!
//! ```text
//! [perf_model/core]
//! frequency = 2.66
//! type = rob
//! ```
//!
//! Only parameters with a numeric value are catalogued; strings and paths
//! cannot be swept. Lines the scanner does not recognise are skipped.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::model::QualifiedName;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([^\]]+)\]\s*$").expect("valid section regex"));

static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^=\s]+)\s*=\s*(\S+)").expect("valid parameter regex"));

/// Sections of a configuration file and their numeric parameters,
/// both in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterCatalog {
    sections: IndexMap<String, Vec<String>>,
}

impl ParameterCatalog {
    /// Scan configuration text.
    ///
    /// A section header registers its section even when no numeric parameter
    /// follows. Parameters seen before the first header are dropped, and a
    /// parameter repeated within a section is listed once.
    pub fn parse(text: &str) -> Self {
        let mut sections: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if let Some(caps) = SECTION_RE.captures(line) {
                let name = caps[1].trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = current.as_deref() else {
                continue;
            };
            let Some(caps) = PARAM_RE.captures(line) else {
                continue;
            };

            if !is_numeric(&caps[2]) {
                continue;
            }

            let params = sections.entry(section.to_string()).or_default();
            let name = &caps[1];
            if !params.iter().any(|p| p == name) {
                params.push(name.to_string());
            }
        }

        Self { sections }
    }

    /// Section names in discovery order
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Numeric parameters of a section, or `None` for an unknown section
    pub fn parameters(&self, section: &str) -> Option<&[String]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    /// Iterate over `(section, parameters)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(section, params)| (section.as_str(), params.as_slice()))
    }

    /// Every catalogued parameter as a qualified name
    pub fn qualified_names(&self) -> Vec<QualifiedName> {
        self.iter()
            .flat_map(|(section, params)| {
                params
                    .iter()
                    .map(move |param| QualifiedName::new(section, param.as_str()))
            })
            .collect()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.parameters(&name.section)
            .is_some_and(|params| params.iter().any(|p| *p == name.parameter))
    }

    /// Total number of catalogued parameters
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// Whether a value token is a finite number
fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}
