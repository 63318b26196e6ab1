//! Error taxonomy for the analysis engine.
//!
//! Every failure is raised synchronously at the stage that detects it
//! (normalizer for shape/size problems, executor for numeric degeneracy)
//! and propagates to the caller unmodified — the engine never silently
//! substitutes one test for another.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors produced while normalizing input or executing a test.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A group has fewer observations than the stage requires.
    #[error("group '{group}' has {n} observations; at least {min} required")]
    InsufficientData {
        /// Name of the offending group.
        group: String,
        /// Observations remaining after missing-value removal.
        n: usize,
        /// Minimum required by the failing stage.
        min: usize,
    },

    /// The request shape is malformed (mismatched paired lengths,
    /// wrong group-name count, empty group list, paired with ≠ 2 groups).
    #[error("invalid input shape: {0}")]
    InvalidShape(String),

    /// A parameter is outside its domain (alpha or conf_level outside
    /// the open interval (0, 1), non-finite mu).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The data admit no defined test statistic (zero-variance group,
    /// identical paired series, non-finite value after missing removal).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}
