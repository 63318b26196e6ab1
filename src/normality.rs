//! Normality assessment.
//!
//! Runs the Shapiro-Wilk test on each group independently and combines
//! the per-group verdicts into one aggregate gate: the analysis goes
//! down the parametric branch only when *every* group passes. A single
//! non-normal group forces the whole analysis onto the non-parametric
//! branch; there is no partial mixing of procedures within one analysis.
//!
//! The W statistic and p-value follow the Royston (1992, 1995)
//! approximation (AS R94), the standard algorithm for n ≥ 3.

use log::warn;
use serde::Serialize;

use crate::dist;
use crate::error::{AnalysisError, Result};
use crate::input::{Group, MIN_GROUP_SIZE};

/// Sample size above which Shapiro-Wilk p-values become unreliable by
/// convention. Oversized groups are still assessed; handling the excess
/// is the caller's responsibility.
pub const LARGE_SAMPLE_WARNING: usize = 5000;

/// Per-group normality verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityVerdict {
    /// Group (or difference-series) name.
    pub group: String,
    /// Shapiro-Wilk W statistic, in (0, 1]; values near 1 suggest
    /// normality.
    pub statistic: f64,
    /// P-value of the test.
    pub p_value: f64,
    /// `p_value > alpha`.
    pub is_normal: bool,
}

/// Aggregate normality assessment over all groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityAssessment {
    verdicts: Vec<NormalityVerdict>,
    all_normal: bool,
}

impl NormalityAssessment {
    /// Per-group verdicts, in group order.
    pub fn verdicts(&self) -> &[NormalityVerdict] {
        &self.verdicts
    }

    /// True iff every per-group verdict is normal.
    pub fn all_normal(&self) -> bool {
        self.all_normal
    }
}

/// Assesses each group with Shapiro-Wilk at significance `alpha`.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] if a group has fewer than 3
///   observations (normally rejected earlier by the normalizer).
/// - [`AnalysisError::DegenerateInput`] if a group has zero variance.
pub fn assess(groups: &[Group], alpha: f64) -> Result<NormalityAssessment> {
    let mut verdicts = Vec::with_capacity(groups.len());
    for g in groups {
        if g.len() > LARGE_SAMPLE_WARNING {
            warn!(
                "group '{}' has {} observations; Shapiro-Wilk p-values above n = {} are approximate",
                g.name(),
                g.len(),
                LARGE_SAMPLE_WARNING
            );
        }
        let (w, p) = shapiro_wilk(g.name(), g.values())?;
        verdicts.push(NormalityVerdict {
            group: g.name().to_string(),
            statistic: w,
            p_value: p,
            is_normal: p > alpha,
        });
    }
    let all_normal = verdicts.iter().all(|v| v.is_normal);
    Ok(NormalityAssessment {
        verdicts,
        all_normal,
    })
}

/// Shapiro-Wilk test: H₀: the sample is normally distributed.
///
/// # Algorithm
///
/// Royston's AS R94:
/// 1. Coefficients from Blom-approximated normal order statistics.
/// 2. W = (Σ aᵢ x₍ᵢ₎)² / Σ (xᵢ - x̄)².
/// 3. Transform W to a z-score (log-normal approximation) and read the
///    p-value off the standard normal upper tail.
///
/// # Returns
///
/// `(w, p_value)`.
///
/// # References
///
/// - Shapiro & Wilk (1965). "An analysis of variance test for
///   normality". Biometrika, 52(3–4), 591–611.
/// - Royston (1995). "Remark AS R94: A remark on Algorithm AS 181".
///   Applied Statistics, 44(4), 547–551.
pub fn shapiro_wilk(name: &str, data: &[f64]) -> Result<(f64, f64)> {
    let n = data.len();
    if n < MIN_GROUP_SIZE {
        return Err(AnalysisError::InsufficientData {
            group: name.to_string(),
            n,
            min: MIN_GROUP_SIZE,
        });
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if x[n - 1] - x[0] < 1e-300 {
        return Err(AnalysisError::DegenerateInput(format!(
            "group '{name}' has zero variance"
        )));
    }

    if n == 3 {
        return Ok(shapiro_wilk_n3(&x));
    }

    let half = n / 2;
    let a = coefficients(name, n, half)?;
    let w = w_statistic(&x, &a, n, half);
    let w = w.min(1.0);
    let p = p_value(w, n)?;
    Ok((w, p.clamp(0.0, 1.0)))
}

// Exact small-sample case: a = [1/√2, 0, -1/√2] and a closed-form
// p-value, p = 1 - (6/π) arccos(√W).
fn shapiro_wilk_n3(x: &[f64]) -> (f64, f64) {
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    let num = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = ((num * num) / ss).clamp(0.75, 1.0);
    let p = (1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos()).clamp(0.0, 1.0);
    (w, p)
}

// Royston polynomial constants (AS R94).
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

fn coefficients(name: &str, n: usize, half: usize) -> Result<Vec<f64>> {
    let nf = n as f64;

    // Blom approximation for expected normal order statistics.
    let mut m = Vec::with_capacity(half);
    let mut sum_m2 = 0.0;
    for i in 0..half {
        let p = (i as f64 + 1.0 - 0.375) / (nf + 0.25);
        let mi = dist::normal_quantile(p)?;
        sum_m2 += mi * mi;
        m.push(mi);
    }
    sum_m2 *= 2.0;
    let root_sum = sum_m2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = poly(&C1, rsn) - m[0] / root_sum;

    let mut a = vec![0.0; half];
    let (corrected, fac_sq, one_minus) = if n <= 5 {
        (1, sum_m2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    } else {
        let a2 = poly(&C2, rsn) - m[1] / root_sum;
        a[1] = a2;
        (
            2,
            sum_m2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    };
    a[0] = a1;

    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(AnalysisError::DegenerateInput(format!(
            "group '{name}': Shapiro-Wilk coefficient normalization failed"
        )));
    }
    let fac = (fac_sq / one_minus).sqrt();
    for i in corrected..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn w_statistic(x: &[f64], a: &[f64], n: usize, half: usize) -> f64 {
    let mut sa = 0.0;
    for i in 0..half {
        sa += a[i] * (x[n - 1 - i] - x[i]);
    }
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    (sa * sa) / ss
}

fn p_value(w: f64, n: usize) -> Result<f64> {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return Ok(1.0);
    }
    let y = w1.ln();

    let z = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return Ok(0.0); // extremely non-normal
        }
        let y2 = -(gamma - y).ln();
        let m = poly(&C3, nf);
        let s = poly(&C4, nf).exp();
        (y2 - m) / s
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        (y - m) / s
    };
    Ok(1.0 - dist::normal_cdf(z)?)
}
