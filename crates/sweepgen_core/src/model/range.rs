//! Sweep ranges for a single parameter.

use crate::error::SweepError;

use super::round_to_cents;

/// Smallest allowed step; keeps enumeration finite
pub const MIN_STEP: f64 = 0.01;
/// Lower clamp for range bounds
pub const MIN_BOUND: f64 = 0.01;
/// Upper clamp for range bounds
pub const MAX_BOUND: f64 = 9999.99;

/// Distance from a whole number below which a step quotient is treated as whole
const QUOTIENT_SNAP: f64 = 1e-9;

/// Validated `(min, max, step)` triple.
///
/// Construction clamps both bounds to `[MIN_BOUND, MAX_BOUND]`, floors the
/// step at `MIN_STEP` and swaps the bounds when they are inverted, so every
/// `SweepRange` satisfies `MIN_STEP <= step` and `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    min: f64,
    max: f64,
    step: f64,
}

impl SweepRange {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, SweepError> {
        for (field, value) in [("min", min), ("max", max), ("step", step)] {
            if !value.is_finite() {
                return Err(SweepError::NonFiniteBound { field, value });
            }
        }

        let step = step.max(MIN_STEP);
        let mut min = min.clamp(MIN_BOUND, MAX_BOUND);
        let mut max = max.clamp(MIN_BOUND, MAX_BOUND);
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Estimated number of values, `ceil((max - min) / step) + 1`.
    ///
    /// Only used to order parameters; the enumerator steps through the range
    /// itself, and accumulated floating-point error can make the real count
    /// differ from this estimate by one. A quotient within
    /// `QUOTIENT_SNAP` of a whole number is taken as that number, so
    /// `0.6 / 0.1` counts as 6, not 7.
    pub fn iteration_count(&self) -> usize {
        let quotient = (self.max - self.min) / self.step;
        let nearest = quotient.round();
        let snapped = if (quotient - nearest).abs() < QUOTIENT_SNAP {
            nearest
        } else {
            quotient
        };
        snapped.ceil() as usize + 1
    }

    /// Values visited by the sweep: `min`, `min + step`, ... while `<= max`,
    /// each rounded to two decimals.
    ///
    /// Rounding can map two neighbouring raw values onto the same cent; such
    /// repeats are collapsed since they would address the same directory.
    pub fn values(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Number of values [`values`](Self::values) yields, without collecting them
    pub fn value_count(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> RangeValues {
        RangeValues {
            current: self.min,
            max: self.max,
            step: self.step,
            last: None,
        }
    }
}

/// Iterator over the rounded values of a [`SweepRange`]
#[derive(Debug, Clone)]
pub struct RangeValues {
    current: f64,
    max: f64,
    step: f64,
    last: Option<f64>,
}

impl Iterator for RangeValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        while self.current <= self.max {
            let rounded = round_to_cents(self.current);
            self.current += self.step;
            if self.last != Some(rounded) {
                self.last = Some(rounded);
                return Some(rounded);
            }
        }
        None
    }
}
