//! Box-plot statistics.
//!
//! Quantiles use linear interpolation between closest ranks: for a sorted
//! sample of `n` values the `p`-quantile sits at position `(n - 1) * p` and
//! fractional positions interpolate between the two neighbouring values.
//! The median is the 0.5 quantile, so an even-sized sample yields the mean
//! of its two middle values.

use serde::Serialize;

use crate::error::{OctsError, Result};

/// `(min, Q1, median, Q3, max)` of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 5]")]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    pub fn to_array(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

impl From<FiveNumberSummary> for [f64; 5] {
    fn from(s: FiveNumberSummary) -> Self {
        s.to_array()
    }
}

/// Compute the five-number summary of `values` in any order.
pub fn summarize(values: &[f64]) -> Result<FiveNumberSummary> {
    if values.is_empty() {
        return Err(OctsError::EmptySample);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(FiveNumberSummary {
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: median_sorted(&sorted),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// `p`-quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

pub fn median_sorted(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_even_sample() {
        let s = summarize(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 9.0);
        assert_relative_eq!(s.q1, 1.75);
        assert_relative_eq!(s.median, 3.5);
        assert_relative_eq!(s.q3, 5.25);
    }

    #[test]
    fn summary_of_odd_sample_uses_middle_element() {
        let s = summarize(&[7.0, 1.0, 3.0, 5.0, 9.0]).unwrap();
        assert_eq!(s.to_array(), [1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn single_value_collapses_summary() {
        let s = summarize(&[2051.0]).unwrap();
        assert_eq!(s.to_array(), [2051.0; 5]);
    }

    #[test]
    fn sort_is_numeric_not_lexicographic() {
        // As strings "100" < "20" < "3".
        let s = summarize(&[100.0, 20.0, 3.0]).unwrap();
        assert_eq!(s.min, 3.0);
        assert_eq!(s.median, 20.0);
        assert_eq!(s.max, 100.0);
    }

    #[test]
    fn order_independent() {
        let a = summarize(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]).unwrap();
        let b = summarize(&[9.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]).unwrap();
        let c = summarize(&[1.0, 2.0, 1.0, 9.0, 6.0, 3.0, 5.0, 4.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn empty_sample_is_an_error() {
        assert_eq!(summarize(&[]), Err(OctsError::EmptySample));
    }

    #[test]
    fn serializes_as_five_element_array() {
        let s = summarize(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "[1.0,1.5,2.0,2.5,3.0]");
    }
}
