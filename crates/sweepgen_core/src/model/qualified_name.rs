//! Identifiers for sweepable parameters
//!
//! A parameter is addressed by its section and its name. The rendered form,
//! `[section]/parameter`, is what users type on the command line and what the
//! catalog lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// Section-qualified parameter name, rendered as `[section]/parameter`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub section: String,
    pub parameter: String,
}

impl QualifiedName {
    pub fn new(section: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            parameter: parameter.into(),
        }
    }

    /// Section header line as it appears in a configuration file
    pub fn section_header(&self) -> String {
        format!("[{}]", self.section)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]/{}", self.section, self.parameter)
    }
}

impl FromStr for QualifiedName {
    type Err = SweepError;

    /// Parse `[section]/parameter`.
    ///
    /// Either part may contain `/` (`[perf_model/core]`); section names never
    /// contain `]`, so the split happens at the first `]/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SweepError::EmptyParameterName);
        }

        let invalid = || SweepError::InvalidQualifiedName(s.to_string());
        let (section, parameter) = s
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("]/"))
            .ok_or_else(invalid)?;
        let section = section.trim();
        let parameter = parameter.trim();

        if section.is_empty() || parameter.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(section, parameter))
    }
}
