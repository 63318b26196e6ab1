//! Thin wrappers over `statrs` distributions.
//!
//! Every hypothesis test in this crate reduces to a statistic plus a
//! tail probability from one of four reference distributions. The
//! wrappers validate the distribution parameters and surface failures
//! through the crate error type instead of panicking.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use crate::error::{AnalysisError, Result};

fn bad_df(what: &str, df: f64) -> AnalysisError {
    AnalysisError::DegenerateInput(format!("{what} degrees of freedom invalid: {df}"))
}

/// Φ(z), the standard normal CDF.
pub fn normal_cdf(z: f64) -> Result<f64> {
    let n = Normal::new(0.0, 1.0)
        .map_err(|e| AnalysisError::DegenerateInput(format!("normal distribution: {e}")))?;
    Ok(n.cdf(z))
}

/// Φ⁻¹(p), the standard normal quantile.
pub fn normal_quantile(p: f64) -> Result<f64> {
    let n = Normal::new(0.0, 1.0)
        .map_err(|e| AnalysisError::DegenerateInput(format!("normal distribution: {e}")))?;
    Ok(n.inverse_cdf(p))
}

/// CDF of Student's t with `df` degrees of freedom.
pub fn t_cdf(x: f64, df: f64) -> Result<f64> {
    let d = StudentsT::new(0.0, 1.0, df).map_err(|_| bad_df("t", df))?;
    Ok(d.cdf(x))
}

/// Quantile of Student's t with `df` degrees of freedom.
pub fn t_quantile(p: f64, df: f64) -> Result<f64> {
    let d = StudentsT::new(0.0, 1.0, df).map_err(|_| bad_df("t", df))?;
    Ok(d.inverse_cdf(p))
}

/// CDF of the F distribution with (`df1`, `df2`) degrees of freedom.
pub fn f_cdf(x: f64, df1: f64, df2: f64) -> Result<f64> {
    let d = FisherSnedecor::new(df1, df2).map_err(|_| bad_df("F", df1.min(df2)))?;
    Ok(d.cdf(x))
}

/// CDF of the chi-squared distribution with `df` degrees of freedom.
pub fn chi2_cdf(x: f64, df: f64) -> Result<f64> {
    let d = ChiSquared::new(df).map_err(|_| bad_df("chi-squared", df))?;
    Ok(d.cdf(x))
}
