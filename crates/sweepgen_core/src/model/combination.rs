use serde::{Deserialize, Serialize};

use super::QualifiedName;

/// Round to two decimal places, halves away from zero
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a sweep value the way it appears in paths and config lines.
///
/// Uses the shortest decimal that reads back to the same `f64`, so whole
/// numbers print without a fractional part (`3000`, `2.5`).
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

/// One concrete value chosen for one swept parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub parameter: QualifiedName,
    pub value: f64,
}

impl Assignment {
    /// Directory segment encoding this assignment, `<parameter>_<value>`
    pub fn segment(&self) -> String {
        format!("{}_{}", self.parameter.parameter, format_value(self.value))
    }

    /// Config line for this assignment, `<parameter> = <value>`
    pub fn config_line(&self) -> String {
        format!("{} = {}", self.parameter.parameter, format_value(self.value))
    }
}

/// A full assignment of values to every swept parameter.
///
/// Assignments are kept in enumeration order; the first one maps to the
/// shallowest directory level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    assignments: Vec<Assignment>,
}

impl Combination {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Value assigned to `parameter`, if it is part of this combination
    pub fn value_of(&self, parameter: &QualifiedName) -> Option<f64> {
        self.assignments
            .iter()
            .find(|a| &a.parameter == parameter)
            .map(|a| a.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }
}

impl<'a> IntoIterator for &'a Combination {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(3100.004), 3100.0);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3000.0), "3000");
        assert_eq!(format_value(3100.5), "3100.5");
        assert_eq!(format_value(0.01), "0.01");
    }

    #[test]
    fn test_assignment_rendering() {
        let assignment = Assignment {
            parameter: QualifiedName::new("perf_model/core", "frequency"),
            value: 2.66,
        };
        assert_eq!(assignment.segment(), "frequency_2.66");
        assert_eq!(assignment.config_line(), "frequency = 2.66");
    }

    #[test]
    fn test_value_of() {
        let freq = QualifiedName::new("perf_model/core", "frequency");
        let cores = QualifiedName::new("general", "total_cores");
        let combination = Combination::new(vec![Assignment {
            parameter: freq.clone(),
            value: 3000.0,
        }]);

        assert_eq!(combination.value_of(&freq), Some(3000.0));
        assert_eq!(combination.value_of(&cores), None);
    }
}
