//! Post-hoc pairwise comparisons.
//!
//! Run only after a significant multi-group omnibus test. Every
//! unordered pair of groups gets the pairwise analogue of the omnibus
//! procedure (Welch t-test on the parametric branch, rank-sum on the
//! non-parametric branch), two-sided, with Bonferroni correction to
//! control the family-wise error rate.

use serde::Serialize;

use crate::config::Alternative;
use crate::error::Result;
use crate::input::Group;
use crate::testing;

/// One pairwise comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    /// First group of the pair (earlier in insertion order).
    pub group_a: String,
    /// Second group of the pair.
    pub group_b: String,
    /// Uncorrected two-sided p-value.
    pub p_raw: f64,
    /// Bonferroni-corrected p-value: min(p_raw × pair count, 1).
    pub p_adjusted: f64,
}

/// All pairwise comparisons for one analysis, in insertion-pair order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostHocResult {
    comparisons: Vec<PairwiseComparison>,
}

impl PostHocResult {
    /// The comparisons, ordered by (first group, second group) position.
    pub fn comparisons(&self) -> &[PairwiseComparison] {
        &self.comparisons
    }

    /// Number of pairs, k(k-1)/2 for k groups.
    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    /// Whether there are no comparisons (cannot happen for k ≥ 2).
    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }
}

/// Runs pairwise comparisons over all unordered group pairs.
///
/// `parametric` selects the pairwise procedure to match the omnibus
/// branch; `conf_level` is forwarded to the pairwise t-tests. Pair
/// enumeration follows group insertion order, so output ordering is
/// deterministic.
pub fn pairwise(groups: &[Group], parametric: bool, conf_level: f64) -> Result<PostHocResult> {
    let k = groups.len();
    let n_pairs = k * (k - 1) / 2;
    let mut comparisons = Vec::with_capacity(n_pairs);
    for i in 0..k {
        for j in (i + 1)..k {
            let (a, b) = (&groups[i], &groups[j]);
            let outcome = if parametric {
                testing::two_sample_t(a.values(), b.values(), Alternative::TwoSided, conf_level)?
            } else {
                testing::rank_sum(a.values(), b.values(), Alternative::TwoSided)?
            };
            comparisons.push(PairwiseComparison {
                group_a: a.name().to_string(),
                group_b: b.name().to_string(),
                p_raw: outcome.p_value,
                p_adjusted: bonferroni(outcome.p_value, n_pairs),
            });
        }
    }
    Ok(PostHocResult { comparisons })
}

/// Bonferroni correction: min(p × m, 1).
pub fn bonferroni(p: f64, m: usize) -> f64 {
    (p * m as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_groups() -> Vec<Group> {
        vec![
            Group::new("low", vec![1.0, 2.0, 3.0, 2.0, 1.5]),
            Group::new("mid", vec![5.0, 6.0, 7.0, 6.0, 5.5]),
            Group::new("high", vec![10.0, 11.0, 12.0, 11.0, 10.5]),
        ]
    }

    #[test]
    fn pair_count_and_order() {
        let result = pairwise(&three_groups(), true, 0.95).expect("should compute");
        assert_eq!(result.len(), 3);
        let names: Vec<(&str, &str)> = result
            .comparisons()
            .iter()
            .map(|c| (c.group_a.as_str(), c.group_b.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("low", "mid"), ("low", "high"), ("mid", "high")]
        );
    }

    #[test]
    fn correction_bounds() {
        for parametric in [true, false] {
            let result = pairwise(&three_groups(), parametric, 0.95).expect("should compute");
            for c in result.comparisons() {
                assert!(c.p_adjusted >= c.p_raw, "{c:?}");
                assert!(c.p_adjusted <= 1.0, "{c:?}");
                assert!((c.p_adjusted - (c.p_raw * 3.0).min(1.0)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn separated_groups_significant_pairs() {
        let result = pairwise(&three_groups(), true, 0.95).expect("should compute");
        assert!(result.comparisons().iter().all(|c| c.p_adjusted < 0.05));
    }

    #[test]
    fn conf_level_only_affects_intervals() {
        // The level is forwarded to the pairwise t-tests; p-values do
        // not depend on it.
        let narrow = pairwise(&three_groups(), true, 0.80).expect("should compute");
        let wide = pairwise(&three_groups(), true, 0.99).expect("should compute");
        assert_eq!(narrow, wide);
    }

    #[test]
    fn bonferroni_caps_at_one() {
        assert_eq!(bonferroni(0.5, 3), 1.0);
        assert!((bonferroni(0.01, 3) - 0.03).abs() < 1e-12);
        assert_eq!(bonferroni(0.2, 1), 0.2);
    }
}
