//! Statistical procedures.
//!
//! The eight procedures the selector can dispatch to: t-tests (one-,
//! two-sample, paired), their rank-based counterparts (Wilcoxon
//! signed-rank, rank-sum), and the omnibus tests (one-way ANOVA,
//! Kruskal-Wallis). Each returns a [`TestOutcome`] with the statistic,
//! p-value, degrees of freedom and confidence interval where defined,
//! and an effect estimate.
//!
//! Direction (`alternative`) and `conf_level` are honored by the one-
//! and two-group procedures; the omnibus tests ignore the direction and
//! produce no interval.

use serde::Serialize;

use crate::config::Alternative;
use crate::descriptive::{mean, median, variance};
use crate::dist;
use crate::error::{AnalysisError, Result};

/// Effect estimate attached to a test outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EffectEstimate {
    /// Sample mean minus the hypothesized mean (one-sample t).
    MeanShift(f64),
    /// Difference of means, first minus second (two-sample/paired t).
    MeanDifference(f64),
    /// Sample median minus the hypothesized mean (one-sample Wilcoxon).
    MedianShift(f64),
    /// Difference of medians, first minus second (rank-based two-group
    /// tests).
    MedianDifference(f64),
    /// Per-group means, in group order (ANOVA).
    GroupMeans(Vec<f64>),
    /// Per-group medians, in group order (Kruskal-Wallis).
    GroupMedians(Vec<f64>),
}

impl EffectEstimate {
    /// Signed magnitude for scalar effects; `None` for the per-group
    /// vectors, which have no single direction.
    pub fn signed_value(&self) -> Option<f64> {
        match self {
            Self::MeanShift(v)
            | Self::MeanDifference(v)
            | Self::MedianShift(v)
            | Self::MedianDifference(v) => Some(*v),
            Self::GroupMeans(_) | Self::GroupMedians(_) => None,
        }
    }
}

/// Raw output of a statistical procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    /// Test statistic (t, W/U, F, or H).
    pub statistic: f64,
    /// P-value under the requested alternative.
    pub p_value: f64,
    /// Degrees of freedom (numerator df for ANOVA); `None` for
    /// rank-based tests.
    pub df: Option<f64>,
    /// Denominator degrees of freedom; ANOVA only.
    pub df_within: Option<f64>,
    /// Confidence interval at `conf_level`; t-tests only. One-sided
    /// alternatives produce a one-sided interval with an infinite far
    /// bound.
    pub conf_int: Option<(f64, f64)>,
    /// Effect estimate.
    pub effect: EffectEstimate,
}

// ---------------------------------------------------------------------------
// t-tests
// ---------------------------------------------------------------------------

/// One-sample t-test: H₀: μ = `mu`.
///
/// t = (x̄ - μ₀) / (s / √n), df = n - 1. The interval covers the
/// population mean at `conf_level`.
///
/// # Errors
///
/// [`AnalysisError::DegenerateInput`] when the sample has zero variance.
pub fn one_sample_t(
    data: &[f64],
    mu: f64,
    alternative: Alternative,
    conf_level: f64,
) -> Result<TestOutcome> {
    let (t, df, m, se) = t_core(data, mu)?;
    Ok(TestOutcome {
        statistic: t,
        p_value: t_tail(t, df, alternative)?,
        df: Some(df),
        df_within: None,
        conf_int: Some(t_interval(m, se, df, conf_level, alternative)?),
        effect: EffectEstimate::MeanShift(m - mu),
    })
}

/// Welch two-sample t-test: H₀: μ₁ = μ₂ (unequal variances).
///
/// Degrees of freedom by the Welch-Satterthwaite approximation. The
/// interval covers the difference of means, first minus second.
///
/// # References
///
/// Welch (1947). "The generalization of Student's problem when several
/// different population variances are involved". Biometrika, 34, 28–35.
pub fn two_sample_t(
    a: &[f64],
    b: &[f64],
    alternative: Alternative,
    conf_level: f64,
) -> Result<TestOutcome> {
    require_len(a, 2)?;
    require_len(b, 2)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(a), mean(b));
    let (v1, v2) = (variance(a) / n1, variance(b) / n2);

    let se_sq = v1 + v2;
    if se_sq < 1e-300 {
        return Err(AnalysisError::DegenerateInput(
            "both samples have zero variance".into(),
        ));
    }
    let se = se_sq.sqrt();
    let diff = m1 - m2;
    let t = diff / se;
    let df = se_sq.powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));

    Ok(TestOutcome {
        statistic: t,
        p_value: t_tail(t, df, alternative)?,
        df: Some(df),
        df_within: None,
        conf_int: Some(t_interval(diff, se, df, conf_level, alternative)?),
        effect: EffectEstimate::MeanDifference(diff),
    })
}

/// Paired t-test: H₀: mean of (xᵢ - yᵢ) = 0.
///
/// A one-sample t-test on the per-pair differences; the interval covers
/// the mean difference.
///
/// # Errors
///
/// [`AnalysisError::InvalidShape`] on unequal lengths;
/// [`AnalysisError::DegenerateInput`] when the differences have zero
/// variance (identical paired series).
pub fn paired_t(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
    conf_level: f64,
) -> Result<TestOutcome> {
    let diffs = paired_differences(x, y)?;
    let (t, df, m, se) = t_core(&diffs, 0.0)?;
    Ok(TestOutcome {
        statistic: t,
        p_value: t_tail(t, df, alternative)?,
        df: Some(df),
        df_within: None,
        conf_int: Some(t_interval(m, se, df, conf_level, alternative)?),
        effect: EffectEstimate::MeanDifference(m),
    })
}

// Shared one-sample machinery: (t, df, mean, standard error).
fn t_core(data: &[f64], mu0: f64) -> Result<(f64, f64, f64, f64)> {
    require_len(data, 2)?;
    let n = data.len() as f64;
    let m = mean(data);
    let var = variance(data);
    if var < 1e-300 {
        return Err(AnalysisError::DegenerateInput(
            "sample has zero variance".into(),
        ));
    }
    let se = (var / n).sqrt();
    Ok(((m - mu0) / se, n - 1.0, m, se))
}

fn t_tail(t: f64, df: f64, alternative: Alternative) -> Result<f64> {
    Ok(match alternative {
        Alternative::TwoSided => (2.0 * (1.0 - dist::t_cdf(t.abs(), df)?)).min(1.0),
        Alternative::Less => dist::t_cdf(t, df)?,
        Alternative::Greater => 1.0 - dist::t_cdf(t, df)?,
    })
}

// Interval around `est` with standard error `se`, one-sided for
// directional alternatives (as R reports them).
fn t_interval(
    est: f64,
    se: f64,
    df: f64,
    conf_level: f64,
    alternative: Alternative,
) -> Result<(f64, f64)> {
    Ok(match alternative {
        Alternative::TwoSided => {
            let q = dist::t_quantile(1.0 - (1.0 - conf_level) / 2.0, df)?;
            (est - q * se, est + q * se)
        }
        Alternative::Less => {
            let q = dist::t_quantile(conf_level, df)?;
            (f64::NEG_INFINITY, est + q * se)
        }
        Alternative::Greater => {
            let q = dist::t_quantile(conf_level, df)?;
            (est - q * se, f64::INFINITY)
        }
    })
}

// ---------------------------------------------------------------------------
// Wilcoxon tests
// ---------------------------------------------------------------------------

/// One-sample Wilcoxon signed-rank test: H₀: the distribution is
/// symmetric about `mu`.
///
/// Normal approximation with tie correction; zero differences are
/// discarded before ranking, per Wilcoxon (1945).
pub fn wilcoxon_signed_rank(data: &[f64], mu: f64, alternative: Alternative) -> Result<TestOutcome> {
    let diffs: Vec<f64> = data.iter().map(|&v| v - mu).collect();
    let (statistic, p_value) = signed_rank_core(&diffs, alternative)?;
    Ok(TestOutcome {
        statistic,
        p_value,
        df: None,
        df_within: None,
        conf_int: None,
        effect: EffectEstimate::MedianShift(median(data) - mu),
    })
}

/// Paired Wilcoxon signed-rank test: H₀: the median of (xᵢ - yᵢ) is 0.
pub fn paired_wilcoxon(x: &[f64], y: &[f64], alternative: Alternative) -> Result<TestOutcome> {
    let diffs = paired_differences(x, y)?;
    let (statistic, p_value) = signed_rank_core(&diffs, alternative)?;
    Ok(TestOutcome {
        statistic,
        p_value,
        df: None,
        df_within: None,
        conf_int: None,
        effect: EffectEstimate::MedianDifference(median(&diffs)),
    })
}

// Signed-rank machinery over a difference series. The statistic is T⁺,
// the sum of ranks of positive differences.
fn signed_rank_core(diffs: &[f64], alternative: Alternative) -> Result<(f64, f64)> {
    let nonzero: Vec<f64> = diffs.iter().copied().filter(|&d| d != 0.0).collect();
    if nonzero.len() < 2 {
        return Err(AnalysisError::DegenerateInput(
            "fewer than two non-zero differences; signed-rank statistic undefined".into(),
        ));
    }
    let n = nonzero.len() as f64;

    let mut by_abs: Vec<(f64, usize)> =
        nonzero.iter().enumerate().map(|(i, &d)| (d.abs(), i)).collect();
    by_abs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let (ranks, tie_correction) = ranks_and_tie_correction(&by_abs);

    let t_plus: f64 = by_abs
        .iter()
        .zip(ranks.iter())
        .filter(|((_, idx), _)| nonzero[*idx] > 0.0)
        .map(|(_, &r)| r)
        .sum();

    let mu_t = n * (n + 1.0) / 4.0;
    let sigma_sq = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0 - tie_correction / 48.0;
    if sigma_sq <= 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "signed-rank variance is zero (all differences tied)".into(),
        ));
    }

    let z = (t_plus - mu_t) / sigma_sq.sqrt();
    Ok((t_plus, normal_tail(z, alternative)?))
}

/// Wilcoxon rank-sum (Mann-Whitney U) test: H₀: the two populations
/// have the same distribution.
///
/// Normal approximation with tie correction. The statistic is U₁ for
/// the first sample, so large values mean the first sample tends
/// larger.
///
/// # References
///
/// Mann & Whitney (1947). "On a test of whether one of two random
/// variables is stochastically larger than the other". Annals of
/// Mathematical Statistics, 18(1), 50–60.
pub fn rank_sum(a: &[f64], b: &[f64], alternative: Alternative) -> Result<TestOutcome> {
    require_len(a, 2)?;
    require_len(b, 2)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let n = n1 + n2;

    let mut combined: Vec<(f64, usize)> = a
        .iter()
        .map(|&v| (v, 0))
        .chain(b.iter().map(|&v| (v, 1)))
        .collect();
    combined.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    let (ranks, tie_correction) = ranks_and_tie_correction(&combined);

    let r1: f64 = combined
        .iter()
        .zip(ranks.iter())
        .filter(|((_, g), _)| *g == 0)
        .map(|(_, &r)| r)
        .sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;

    let mu_u = n1 * n2 / 2.0;
    let sigma_sq = n1 * n2 / 12.0 * (n + 1.0 - tie_correction / (n * (n - 1.0)));
    if sigma_sq <= 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "rank-sum variance is zero (all observations tied)".into(),
        ));
    }

    let z = (u1 - mu_u) / sigma_sq.sqrt();
    Ok(TestOutcome {
        statistic: u1,
        p_value: normal_tail(z, alternative)?,
        df: None,
        df_within: None,
        conf_int: None,
        effect: EffectEstimate::MedianDifference(median(a) - median(b)),
    })
}

fn normal_tail(z: f64, alternative: Alternative) -> Result<f64> {
    Ok(match alternative {
        Alternative::TwoSided => (2.0 * (1.0 - dist::normal_cdf(z.abs())?)).min(1.0),
        Alternative::Less => dist::normal_cdf(z)?,
        Alternative::Greater => 1.0 - dist::normal_cdf(z)?,
    })
}

// ---------------------------------------------------------------------------
// Omnibus tests
// ---------------------------------------------------------------------------

/// One-way ANOVA F-test: H₀: all group means are equal.
///
/// F = MS_between / MS_within with df (k-1, N-k).
///
/// # Errors
///
/// [`AnalysisError::DegenerateInput`] when the within-group variance is
/// zero (every group constant).
pub fn one_way_anova(groups: &[&[f64]]) -> Result<TestOutcome> {
    require_groups(groups)?;
    let k = groups.len();
    let total_n: usize = groups.iter().map(|g| g.len()).sum();

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total_n as f64;
    let group_means: Vec<f64> = groups.iter().map(|g| mean(g)).collect();

    let ss_between: f64 = groups
        .iter()
        .zip(group_means.iter())
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(group_means.iter())
        .map(|(g, &gm)| g.iter().map(|&x| (x - gm).powi(2)).sum::<f64>())
        .sum();

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;

    if ms_within < 1e-300 {
        return Err(AnalysisError::DegenerateInput(
            "within-group variance is zero; F statistic undefined".into(),
        ));
    }

    let f = ms_between / ms_within;
    Ok(TestOutcome {
        statistic: f,
        p_value: 1.0 - dist::f_cdf(f, df_between, df_within)?,
        df: Some(df_between),
        df_within: Some(df_within),
        conf_int: None,
        effect: EffectEstimate::GroupMeans(group_means),
    })
}

/// Kruskal-Wallis H-test: H₀: all groups have the same distribution.
///
/// H = (12 / N(N+1)) Σ nᵢ (R̄ᵢ - R̄)², tie-corrected, with H ~ χ²(k-1)
/// under H₀.
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestOutcome> {
    require_groups(groups)?;
    let k = groups.len();
    let total_n: usize = groups.iter().map(|g| g.len()).sum();
    let n = total_n as f64;

    let mut combined: Vec<(f64, usize)> = Vec::with_capacity(total_n);
    for (gi, g) in groups.iter().enumerate() {
        combined.extend(g.iter().map(|&v| (v, gi)));
    }
    combined.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let (ranks, tie_correction) = ranks_and_tie_correction(&combined);

    let mut rank_sums = vec![0.0; k];
    for ((_, gi), &r) in combined.iter().zip(ranks.iter()) {
        rank_sums[*gi] += r;
    }

    let mean_rank = (n + 1.0) / 2.0;
    let mut h: f64 = groups
        .iter()
        .enumerate()
        .map(|(gi, g)| {
            let ni = g.len() as f64;
            ni * (rank_sums[gi] / ni - mean_rank).powi(2)
        })
        .sum();
    h *= 12.0 / (n * (n + 1.0));

    let denom = 1.0 - tie_correction / (n.powi(3) - n);
    if denom <= 1e-15 {
        return Err(AnalysisError::DegenerateInput(
            "all observations tied; H statistic undefined".into(),
        ));
    }
    h /= denom;

    let df = (k - 1) as f64;
    Ok(TestOutcome {
        statistic: h,
        p_value: 1.0 - dist::chi2_cdf(h, df)?,
        df: Some(df),
        df_within: None,
        conf_int: None,
        effect: EffectEstimate::GroupMedians(groups.iter().map(|g| median(g)).collect()),
    })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn paired_differences(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(AnalysisError::InvalidShape(format!(
            "paired samples must have equal length, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    Ok(x.iter().zip(y.iter()).map(|(&a, &b)| a - b).collect())
}

fn require_len(data: &[f64], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(AnalysisError::InsufficientData {
            group: "sample".into(),
            n: data.len(),
            min,
        });
    }
    Ok(())
}

fn require_groups(groups: &[&[f64]]) -> Result<()> {
    if groups.len() < 2 {
        return Err(AnalysisError::InvalidShape(format!(
            "omnibus test requires at least 2 groups, got {}",
            groups.len()
        )));
    }
    for g in groups {
        require_len(g, 2)?;
    }
    Ok(())
}

// Average ranks over sorted (value, tag) pairs, plus the tie-correction
// term Σ tⱼ(tⱼ² - 1) over tie runs, computed in one pass.
fn ranks_and_tie_correction(sorted: &[(f64, usize)]) -> (Vec<f64>, f64) {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut correction = 0.0;
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && (sorted[end].0 - sorted[start].0).abs() < 1e-12 {
            end += 1;
        }
        let avg = (start + 1 + end) as f64 / 2.0;
        for r in &mut ranks[start..end] {
            *r = avg;
        }
        let t = (end - start) as f64;
        if t > 1.0 {
            correction += t * (t * t - 1.0);
        }
        start = end;
    }
    (ranks, correction)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // One-sample t-test
    // -----------------------------------------------------------------------

    #[test]
    fn one_sample_null_true() {
        let data = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let r = one_sample_t(&data, 5.0, Alternative::TwoSided, 0.95).expect("should compute");
        assert!(r.p_value > 0.3, "p = {}", r.p_value);
        assert_eq!(r.df, Some(7.0));
        let (lo, hi) = r.conf_int.expect("t-test has an interval");
        assert!(lo < 5.0 && 5.0 < hi, "CI = ({lo}, {hi})");
    }

    #[test]
    fn one_sample_null_false() {
        let data = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let r = one_sample_t(&data, 10.0, Alternative::TwoSided, 0.95).expect("should compute");
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
        assert_eq!(r.effect, EffectEstimate::MeanShift(mean(&data) - 10.0));
    }

    #[test]
    fn one_sample_directional_tails() {
        let data = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let less = one_sample_t(&data, 5.2, Alternative::Less, 0.95).expect("should compute");
        let greater = one_sample_t(&data, 5.2, Alternative::Greater, 0.95).expect("should compute");
        // Mean is below 5.2, so "less" is well supported and "greater" is not.
        assert!(less.p_value < 0.05, "p = {}", less.p_value);
        assert!(greater.p_value > 0.9, "p = {}", greater.p_value);
        assert!((less.p_value + greater.p_value - 1.0).abs() < 1e-10);
    }

    #[test]
    fn one_sided_interval_bounds() {
        let data = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let r = one_sample_t(&data, 5.0, Alternative::Less, 0.95).expect("should compute");
        let (lo, hi) = r.conf_int.expect("interval");
        assert!(lo.is_infinite() && lo < 0.0);
        assert!(hi.is_finite());
        let r = one_sample_t(&data, 5.0, Alternative::Greater, 0.95).expect("should compute");
        let (lo, hi) = r.conf_int.expect("interval");
        assert!(lo.is_finite());
        assert!(hi.is_infinite() && hi > 0.0);
    }

    #[test]
    fn one_sample_zero_variance_degenerate() {
        let err = one_sample_t(&[5.0, 5.0, 5.0], 5.0, Alternative::TwoSided, 0.95).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    // -----------------------------------------------------------------------
    // Two-sample t-test
    // -----------------------------------------------------------------------

    #[test]
    fn two_sample_same_mean() {
        let a = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let b = [5.0, 5.2, 4.8, 5.1, 4.9, 5.0, 5.1, 4.9];
        let r = two_sample_t(&a, &b, Alternative::TwoSided, 0.95).expect("should compute");
        assert!(r.p_value > 0.3, "p = {}", r.p_value);
        let (lo, hi) = r.conf_int.expect("interval");
        assert!(lo < 0.0 && 0.0 < hi, "CI = ({lo}, {hi})");
    }

    #[test]
    fn two_sample_different_means() {
        let a = [1.0, 2.0, 3.0, 2.0, 1.5, 2.5];
        let b = [10.0, 11.0, 12.0, 10.5, 11.5, 10.5];
        let r = two_sample_t(&a, &b, Alternative::TwoSided, 0.95).expect("should compute");
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
        assert!(matches!(r.effect, EffectEstimate::MeanDifference(d) if d < 0.0));
    }

    #[test]
    fn welch_df_fractional() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0, 7.0, 8.0, 20.0];
        let df = two_sample_t(&a, &b, Alternative::TwoSided, 0.95)
            .expect("should compute")
            .df
            .expect("df");
        assert!(df > 2.0 && df < 7.0, "df = {df}");
    }

    // -----------------------------------------------------------------------
    // Paired t-test
    // -----------------------------------------------------------------------

    #[test]
    fn paired_significant_difference() {
        let before = [5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let after = [6.2, 7.1, 8.3, 9.0, 10.4, 11.1, 12.2, 13.3];
        let r = paired_t(&before, &after, Alternative::TwoSided, 0.95).expect("should compute");
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
        assert!(r.statistic < 0.0); // after > before
    }

    #[test]
    fn paired_identical_series_degenerate() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let err = paired_t(&x, &x, Alternative::TwoSided, 0.95).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn paired_length_mismatch() {
        let err = paired_t(&[1.0, 2.0, 3.0], &[1.0, 2.0], Alternative::TwoSided, 0.95).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidShape(_)));
    }

    // -----------------------------------------------------------------------
    // Wilcoxon signed-rank
    // -----------------------------------------------------------------------

    #[test]
    fn signed_rank_all_positive() {
        let data = [6.0, 7.0, 8.0, 9.0, 10.0, 11.0];
        let r = wilcoxon_signed_rank(&data, 5.0, Alternative::TwoSided).expect("should compute");
        // All differences positive: T+ is the full rank sum n(n+1)/2.
        assert!((r.statistic - 21.0).abs() < 1e-12);
        assert!(r.p_value < 0.05, "p = {}", r.p_value);
        assert!(r.conf_int.is_none());
        assert!(r.df.is_none());
    }

    #[test]
    fn signed_rank_symmetric_around_mu() {
        let data = [3.0, 4.0, 4.5, 5.5, 6.0, 7.0];
        let r = wilcoxon_signed_rank(&data, 5.0, Alternative::TwoSided).expect("should compute");
        assert!(r.p_value > 0.5, "p = {}", r.p_value);
    }

    #[test]
    fn signed_rank_zero_differences_degenerate() {
        let err =
            wilcoxon_signed_rank(&[5.0, 5.0, 5.0, 5.0], 5.0, Alternative::TwoSided).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn paired_wilcoxon_direction() {
        let before = [85.0, 87.0, 82.0, 90.0, 88.0, 86.0, 84.0, 89.0];
        let after = [88.0, 90.0, 85.0, 92.0, 91.0, 89.0, 87.0, 91.0];
        let r = paired_wilcoxon(&before, &after, Alternative::TwoSided).expect("should compute");
        // All differences (before - after) negative: T+ = 0.
        assert_eq!(r.statistic, 0.0);
        assert!(matches!(r.effect, EffectEstimate::MedianDifference(d) if d < 0.0));
    }

    // -----------------------------------------------------------------------
    // Rank-sum
    // -----------------------------------------------------------------------

    #[test]
    fn rank_sum_separated_groups() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let r = rank_sum(&a, &b, Alternative::TwoSided).expect("should compute");
        assert_eq!(r.statistic, 0.0); // a entirely below b: U1 = 0
        assert!(r.p_value < 0.05, "p = {}", r.p_value);
    }

    #[test]
    fn rank_sum_directional() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let less = rank_sum(&a, &b, Alternative::Less).expect("should compute");
        let greater = rank_sum(&a, &b, Alternative::Greater).expect("should compute");
        assert!(less.p_value < 0.05, "p = {}", less.p_value);
        assert!(greater.p_value > 0.9, "p = {}", greater.p_value);
    }

    #[test]
    fn rank_sum_handles_ties() {
        let a = [1.0, 2.0, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 3.0, 4.0, 5.0];
        let r = rank_sum(&a, &b, Alternative::TwoSided).expect("should compute");
        assert!(r.p_value > 0.05 && r.p_value <= 1.0, "p = {}", r.p_value);
    }

    // -----------------------------------------------------------------------
    // ANOVA
    // -----------------------------------------------------------------------

    #[test]
    fn anova_same_means() {
        let g1 = [5.0, 5.1, 4.9, 5.0, 5.1];
        let g2 = [5.0, 5.2, 4.8, 5.1, 4.9];
        let g3 = [5.1, 4.9, 5.0, 5.0, 5.1];
        let r = one_way_anova(&[&g1, &g2, &g3]).expect("should compute");
        assert!(r.p_value > 0.3, "p = {}", r.p_value);
        assert_eq!(r.df, Some(2.0));
        assert_eq!(r.df_within, Some(12.0));
    }

    #[test]
    fn anova_different_means() {
        let g1 = [1.0, 2.0, 3.0, 2.0, 1.5];
        let g2 = [5.0, 6.0, 7.0, 6.0, 5.5];
        let g3 = [10.0, 11.0, 12.0, 11.0, 10.5];
        let r = one_way_anova(&[&g1, &g2, &g3]).expect("should compute");
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
        match &r.effect {
            EffectEstimate::GroupMeans(means) => {
                assert_eq!(means.len(), 3);
                assert!(means[0] < means[1] && means[1] < means[2]);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn anova_constant_groups_degenerate() {
        let g1 = [1.0, 1.0, 1.0];
        let g2 = [2.0, 2.0, 2.0];
        let err = one_way_anova(&[&g1, &g2]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    // -----------------------------------------------------------------------
    // Kruskal-Wallis
    // -----------------------------------------------------------------------

    #[test]
    fn kruskal_separated_groups() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [6.0, 7.0, 8.0, 9.0, 10.0];
        let g3 = [11.0, 12.0, 13.0, 14.0, 15.0];
        let r = kruskal_wallis(&[&g1, &g2, &g3]).expect("should compute");
        assert!(r.p_value < 0.01, "p = {}", r.p_value);
        assert_eq!(r.df, Some(2.0));
    }

    #[test]
    fn kruskal_overlapping_groups() {
        let g1 = [1.0, 3.0, 5.0, 7.0, 9.0];
        let g2 = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = kruskal_wallis(&[&g1, &g2]).expect("should compute");
        assert!(r.p_value > 0.3, "p = {}", r.p_value);
    }

    #[test]
    fn kruskal_all_tied_degenerate() {
        let g1 = [3.0, 3.0, 3.0];
        let g2 = [3.0, 3.0, 3.0];
        let err = kruskal_wallis(&[&g1, &g2]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    // -----------------------------------------------------------------------
    // Rank helper
    // -----------------------------------------------------------------------

    #[test]
    fn average_ranks_with_ties() {
        let sorted = [(1.0, 0), (2.0, 0), (2.0, 1), (3.0, 1)];
        let (ranks, correction) = ranks_and_tie_correction(&sorted);
        assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
        assert!((correction - 6.0).abs() < 1e-12); // one run of 2: 2·(4-1)
    }
}
