//! # autostat
//!
//! Automatic hypothesis-test selection for numeric samples.
//!
//! Callers hand over raw data in any accepted shape (a single sample,
//! two samples, a paired pair of series, several groups, or a flat
//! value/label table) and get back one immutable report: the engine
//! normalizes the input, gates each group through a Shapiro-Wilk
//! normality check, picks the matching parametric or rank-based
//! procedure, runs it, adds Bonferroni-corrected pairwise comparisons
//! when a multi-group omnibus result is significant, and renders a
//! plain-language recommendation.
//!
//! ## Modules
//!
//! - [`engine`] — Entry point: [`analyze`], [`AnalysisConfig`], [`AnalysisReport`]
//! - [`input`] — Input normalization into canonical groups and a test shape
//! - [`normality`] — Shapiro-Wilk gate (Royston AS R94)
//! - [`selection`] — (shape, normality) → procedure decision table
//! - [`testing`] — t-tests, Wilcoxon tests, one-way ANOVA, Kruskal-Wallis
//! - [`posthoc`] — Pairwise comparisons with Bonferroni correction
//! - [`descriptive`] — Per-group summary statistics
//! - [`config`] — Test parameters and validation
//! - [`error`] — Error type shared across the pipeline
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: identical input and parameters produce an
//!   identical report, bit for bit
//! - **Explainable**: the report carries the normality verdicts and the
//!   selection rationale, never just a p-value
//! - **Fail loud**: degenerate or malformed input is an error, never a
//!   silent fallback to a different test

pub mod config;
pub mod descriptive;
pub(crate) mod dist;
pub mod engine;
pub mod error;
pub mod input;
pub mod normality;
pub mod posthoc;
pub mod selection;
pub mod testing;

pub use config::{Alternative, Parameters};
pub use descriptive::DescriptiveStats;
pub use engine::{analyze, AnalysisConfig, AnalysisReport};
pub use error::{AnalysisError, Result};
pub use input::{DataSource, Group, TestShape};
pub use normality::{NormalityAssessment, NormalityVerdict};
pub use posthoc::{PairwiseComparison, PostHocResult};
pub use selection::{Procedure, SelectedProcedure};
pub use testing::{EffectEstimate, TestOutcome};
