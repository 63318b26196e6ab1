//! Analysis parameters.
//!
//! [`Parameters`] carries everything the engine needs beyond the raw
//! data: the hypothesized mean, the alternative direction, the
//! significance threshold for the normality gate, the confidence level
//! for interval construction, and the paired flag. The full set is
//! echoed in the final report so presentation adapters never re-derive
//! it.

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Direction of the alternative hypothesis.
///
/// Only t-tests and Wilcoxon tests with one or two groups honor the
/// direction; ANOVA and Kruskal-Wallis ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alternative {
    /// H₁: the effect differs from zero in either direction.
    #[default]
    TwoSided,
    /// H₁: the effect is below zero (first sample smaller).
    Less,
    /// H₁: the effect is above zero (first sample larger).
    Greater,
}

/// Parameters for one analysis call.
///
/// # Examples
///
/// ```
/// use autostat::{Alternative, Parameters};
///
/// let params = Parameters::default();
/// assert_eq!(params.mu, 0.0);
/// assert_eq!(params.alpha, 0.05);
/// assert_eq!(params.conf_level, 0.95);
/// assert_eq!(params.alternative, Alternative::TwoSided);
/// assert!(!params.paired);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    /// Hypothesized mean, used only by one-sample procedures.
    pub mu: f64,
    /// Alternative hypothesis direction.
    pub alternative: Alternative,
    /// Significance threshold for the normality gate and for the
    /// post-hoc trigger. Must lie in the open interval (0, 1).
    pub alpha: f64,
    /// Confidence level for the chosen test's interval. Must lie in
    /// the open interval (0, 1).
    pub conf_level: f64,
    /// Whether a two-vector input is paired.
    pub paired: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mu: 0.0,
            alternative: Alternative::TwoSided,
            alpha: 0.05,
            conf_level: 0.95,
            paired: false,
        }
    }
}

impl Parameters {
    /// Validates the parameter set.
    ///
    /// `alpha` and `conf_level` must lie strictly inside (0, 1) and
    /// `mu` must be finite.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if !self.conf_level.is_finite() || self.conf_level <= 0.0 || self.conf_level >= 1.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "conf_level must lie in (0, 1), got {}",
                self.conf_level
            )));
        }
        if !self.mu.is_finite() {
            return Err(AnalysisError::InvalidParameter(format!(
                "mu must be finite, got {}",
                self.mu
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn alpha_boundaries_rejected() {
        let mut p = Parameters::default();
        p.alpha = 0.0;
        assert!(matches!(
            p.validate(),
            Err(AnalysisError::InvalidParameter(_))
        ));
        p.alpha = 1.0;
        assert!(matches!(
            p.validate(),
            Err(AnalysisError::InvalidParameter(_))
        ));
        p.alpha = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn conf_level_boundaries_rejected() {
        let mut p = Parameters::default();
        p.conf_level = 1.0;
        assert!(p.validate().is_err());
        p.conf_level = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn non_finite_mu_rejected() {
        let mut p = Parameters::default();
        p.mu = f64::INFINITY;
        assert!(p.validate().is_err());
    }

    #[test]
    fn interior_values_accepted() {
        let mut p = Parameters::default();
        p.alpha = 0.001;
        p.conf_level = 0.999;
        p.mu = -3.5;
        assert!(p.validate().is_ok());
    }
}
