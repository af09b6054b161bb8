//! Implements empirical tests for checking how index strategies spread keys across a table.
use slotviz_core::IndexStrategy;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::num::NonZeroUsize;

/// A result of a Chi-square test.
#[derive(Debug, Clone, Copy)]
pub struct Chi2Statistic {
    pub chi2: f64,
    pub dof: usize,
    pub p_value: f64,
}

/// Calculates the chi-square statistic.
///
/// # Panics
///
/// - If `observed` and `expected` differ in length or `dof` resolves to zero.
pub fn chi2(observed: &[f64], expected: &[f64], dof: Option<usize>) -> Chi2Statistic {
    assert_eq!(observed.len(), expected.len(), "Dimensions must match");

    let chi2 = observed
        .iter()
        .zip(expected)
        .fold(0.0, |acc, (&obs, &exp)| {
            let diff = obs - exp;
            acc + diff.powi(2) / exp
        });

    let dof = dof.unwrap_or(observed.len() - 1);
    let dist = ChiSquared::new(dof as f64).expect("degrees of freedom must be positive");
    let p_value = 1.0 - dist.cdf(chi2);

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square uniformity test against equally likely cells.
pub fn chi2_uniformity(observed: &[f64]) -> Chi2Statistic {
    let total: f64 = observed.iter().sum();
    let expected_value = total / observed.len() as f64;
    let expected = vec![expected_value; observed.len()];
    chi2(observed, &expected, None)
}

/// Counts how many of the `codes` land in each slot of a table under `strategy`.
///
/// # Panics
///
/// - If the strategy produces an index outside of `[0, capacity)`.
pub fn index_histogram<S: IndexStrategy>(
    strategy: &S,
    codes: impl IntoIterator<Item = u32>,
    capacity: NonZeroUsize,
) -> Vec<f64> {
    let mut histogram = vec![0.0; capacity.get()];
    for code in codes {
        let index = strategy.compute(code, capacity);
        assert!(
            index < capacity.get(),
            "Index {} is out of range for capacity {}",
            index,
            capacity
        );
        histogram[index] += 1.0;
    }
    histogram
}
