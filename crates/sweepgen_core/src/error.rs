use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::QualifiedName;

/// Errors raised while planning or materializing a sweep.
///
/// Malformed lines in configuration files and reports are never errors; those
/// parsers skip what they cannot interpret.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("parameter name required")]
    EmptyParameterName,

    #[error("invalid parameter name `{0}` (expected `[section]/parameter`)")]
    InvalidQualifiedName(String),

    #[error("parameter {0} is not a numeric parameter of the loaded configuration")]
    UnknownParameter(QualifiedName),

    #[error("parameter {0} is already being swept")]
    DuplicateParameter(QualifiedName),

    #[error("range {field} must be a finite number (got {value})")]
    NonFiniteBound { field: &'static str, value: f64 },

    #[error("no parameters selected for sweeping")]
    NoParameters,

    /// Some range contributed zero values, so the Cartesian product is empty
    #[error("sweep produced no combinations")]
    NoCombinations,

    /// The Cartesian product is too large to count or hold in memory
    #[error("sweep has too many combinations to generate")]
    TooManyCombinations,

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Generation was cancelled between two combinations
    #[error("generation cancelled after {completed} of {total} combinations")]
    Cancelled { completed: usize, total: usize },
}

impl SweepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SweepError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from bad caller input, in which case no work was done
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SweepError::EmptyParameterName
                | SweepError::InvalidQualifiedName(_)
                | SweepError::UnknownParameter(_)
                | SweepError::DuplicateParameter(_)
                | SweepError::NonFiniteBound { .. }
                | SweepError::NoParameters
                | SweepError::TooManyCombinations
        )
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
