//! Cartesian product of swept parameter values.

use crate::error::{Result, SweepError};
use crate::model::{Assignment, Combination};

use super::{SweepDefinition, SweepPlan};

/// Order in which parameters are nested in the output tree.
///
/// Definitions are taken section by section (see [`SweepPlan::by_section`])
/// and then stable-sorted by ascending iteration count, so the parameter with
/// the fewest values varies slowest and sits at the shallowest directory level.
pub fn sweep_order(plan: &SweepPlan) -> Vec<&SweepDefinition> {
    let mut ordered: Vec<&SweepDefinition> = plan
        .by_section()
        .into_iter()
        .flat_map(|group| group.definitions)
        .collect();
    ordered.sort_by_key(|d| d.range.iteration_count());
    ordered
}

/// Product of `counts`, or [`SweepError::TooManyCombinations`] if it does not
/// fit in a `usize`
fn checked_product(counts: impl IntoIterator<Item = usize>) -> Result<usize> {
    counts
        .into_iter()
        .try_fold(1usize, |acc, n| acc.checked_mul(n))
        .ok_or(SweepError::TooManyCombinations)
}

/// Number of combinations [`enumerate`] will produce for `plan`
pub fn combination_count(plan: &SweepPlan) -> Result<usize> {
    checked_product(sweep_order(plan).iter().map(|d| d.range.value_count()))
}

/// Generate every combination of values for the swept parameters.
///
/// Assignments within a combination follow [`sweep_order`]; the first
/// parameter varies slowest. An empty plan yields a single empty combination,
/// and a parameter with no values makes the whole product empty. A product
/// too large to count is rejected before anything is allocated for it.
pub fn enumerate(plan: &SweepPlan) -> Result<Vec<Combination>> {
    let ordered = sweep_order(plan);
    let axes: Vec<Vec<f64>> = ordered.iter().map(|d| d.range.values()).collect();

    if axes.iter().any(Vec::is_empty) {
        return Ok(Vec::new());
    }

    let total = checked_product(axes.iter().map(Vec::len))?;
    let mut combinations = Vec::new();
    combinations
        .try_reserve_exact(total)
        .map_err(|_| SweepError::TooManyCombinations)?;
    let mut indices = vec![0usize; axes.len()];

    loop {
        let assignments = ordered
            .iter()
            .zip(&axes)
            .zip(&indices)
            .map(|((definition, values), &idx)| Assignment {
                parameter: definition.parameter.clone(),
                value: values[idx],
            })
            .collect();
        combinations.push(Combination::new(assignments));

        // Advance like an odometer: last axis fastest
        let mut carry = true;
        for (index, values) in indices.iter_mut().zip(&axes).rev() {
            *index += 1;
            if *index < values.len() {
                carry = false;
                break;
            }
            *index = 0;
        }

        // Wrapped past the first axis (or there are no axes at all)
        if carry {
            break;
        }
    }

    Ok(combinations)
}
