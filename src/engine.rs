//! Analysis engine.
//!
//! The single entry point tying the pipeline together: normalize input,
//! assess normality, select a procedure, execute it (with post-hoc
//! pairwise comparisons for significant multi-group results), and
//! assemble everything into an immutable [`AnalysisReport`].
//!
//! The engine is synchronous and allocation-local: one call is a pure
//! computation over its input, reports are never mutated after
//! assembly, and concurrent calls over disjoint inputs need no
//! coordination.

use serde::Serialize;

use crate::config::Parameters;
use crate::descriptive::DescriptiveStats;
use crate::error::Result;
use crate::input::{self, DataSource, Group, TestShape};
use crate::normality::{self, NormalityAssessment};
use crate::posthoc::{self, PostHocResult};
use crate::selection::{self, Procedure, SelectedProcedure};
use crate::testing::{self, TestOutcome};

/// Configuration for one analysis call.
///
/// # Examples
///
/// ```
/// use autostat::{analyze, AnalysisConfig, DataSource};
///
/// let config = AnalysisConfig::new(DataSource::Pair(
///     vec![4.9, 5.1, 5.0, 4.8, 5.2, 5.0],
///     vec![6.9, 7.1, 7.0, 6.8, 7.2, 7.0],
/// ));
/// let report = analyze(&config).unwrap();
/// assert!(report.outcome().p_value < 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Raw data in any accepted shape.
    pub data: DataSource,
    /// Optional group-name override (rejected for table input).
    pub group_names: Option<Vec<String>>,
    /// Test parameters; defaults match the conventional surface
    /// (mu = 0, two-sided, alpha = 0.05, conf_level = 0.95, unpaired).
    pub params: Parameters,
}

impl AnalysisConfig {
    /// Configuration with default parameters.
    pub fn new(data: DataSource) -> Self {
        Self {
            data,
            group_names: None,
            params: Parameters::default(),
        }
    }

    /// Sets the hypothesized mean for one-sample shapes.
    pub fn mu(mut self, mu: f64) -> Self {
        self.params.mu = mu;
        self
    }

    /// Sets the alternative direction.
    pub fn alternative(mut self, alternative: crate::config::Alternative) -> Self {
        self.params.alternative = alternative;
        self
    }

    /// Sets the significance threshold for the normality gate and the
    /// post-hoc trigger.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Sets the confidence level for interval construction.
    pub fn conf_level(mut self, conf_level: f64) -> Self {
        self.params.conf_level = conf_level;
        self
    }

    /// Marks a two-vector input as paired.
    pub fn paired(mut self, paired: bool) -> Self {
        self.params.paired = paired;
        self
    }

    /// Overrides the default group names.
    pub fn group_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Immutable result of one analysis.
///
/// Assembled once per call and consumed read-only by plotting and
/// reporting adapters; it carries everything they need (including the
/// parameters used) so nothing is ever recomputed downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    groups: Vec<Group>,
    shape: TestShape,
    normality: NormalityAssessment,
    selected: SelectedProcedure,
    outcome: TestOutcome,
    post_hoc: Option<PostHocResult>,
    descriptives: Vec<DescriptiveStats>,
    recommendation: String,
    params: Parameters,
}

impl AnalysisReport {
    /// Canonical groups, in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Derived test shape.
    pub fn shape(&self) -> TestShape {
        self.shape
    }

    /// Per-group (or difference-series) normality verdicts and the
    /// aggregate gate.
    pub fn normality(&self) -> &NormalityAssessment {
        &self.normality
    }

    /// The selected procedure and the verdict that produced it.
    pub fn selected(&self) -> SelectedProcedure {
        self.selected
    }

    /// Raw output of the selected procedure.
    pub fn outcome(&self) -> &TestOutcome {
        &self.outcome
    }

    /// Pairwise comparisons; present only for a significant multi-group
    /// omnibus result.
    pub fn post_hoc(&self) -> Option<&PostHocResult> {
        self.post_hoc.as_ref()
    }

    /// Per-group descriptive statistics, computed unconditionally.
    pub fn descriptives(&self) -> &[DescriptiveStats] {
        &self.descriptives
    }

    /// Plain-language summary built from a fixed template table.
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Parameters the analysis ran with.
    pub fn params(&self) -> Parameters {
        self.params
    }
}

/// Runs the full pipeline on one configuration.
///
/// # Errors
///
/// Any [`crate::AnalysisError`]: parameter, shape, and size problems
/// from the normalizer; degenerate-input failures from the normality
/// gate or the procedure itself. Errors propagate unmodified — the
/// engine never silently substitutes one test for another.
pub fn analyze(config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.params.validate()?;
    let params = config.params;

    let (groups, shape) =
        input::normalize(&config.data, config.group_names.as_deref(), params.paired)?;

    // The paired gate runs on the per-pair differences, not the two
    // series themselves.
    let normality = match shape {
        TestShape::Paired => {
            let diffs: Vec<f64> = groups[0]
                .values()
                .iter()
                .zip(groups[1].values())
                .map(|(&a, &b)| a - b)
                .collect();
            let diff_group = Group::new(
                format!("{} - {}", groups[0].name(), groups[1].name()),
                diffs,
            );
            normality::assess(std::slice::from_ref(&diff_group), params.alpha)?
        }
        _ => normality::assess(&groups, params.alpha)?,
    };

    let selected = selection::select(shape, normality.all_normal());
    let outcome = run_procedure(selected.procedure, &groups, &params)?;

    let post_hoc = if shape == TestShape::MultiGroup && outcome.p_value <= params.alpha {
        Some(posthoc::pairwise(
            &groups,
            selected.procedure.is_parametric(),
            params.conf_level,
        )?)
    } else {
        None
    };

    let descriptives = groups
        .iter()
        .map(|g| DescriptiveStats::from_sample(g.name(), g.values()))
        .collect();

    let recommendation = recommend(shape, selected.procedure, &outcome, &groups, &params);

    Ok(AnalysisReport {
        groups,
        shape,
        normality,
        selected,
        outcome,
        post_hoc,
        descriptives,
        recommendation,
        params,
    })
}

fn run_procedure(
    procedure: Procedure,
    groups: &[Group],
    params: &Parameters,
) -> Result<TestOutcome> {
    let alt = params.alternative;
    match procedure {
        Procedure::OneSampleT => {
            testing::one_sample_t(groups[0].values(), params.mu, alt, params.conf_level)
        }
        Procedure::OneSampleWilcoxon => {
            testing::wilcoxon_signed_rank(groups[0].values(), params.mu, alt)
        }
        Procedure::TwoSampleT => {
            testing::two_sample_t(groups[0].values(), groups[1].values(), alt, params.conf_level)
        }
        Procedure::RankSum => testing::rank_sum(groups[0].values(), groups[1].values(), alt),
        Procedure::PairedT => {
            testing::paired_t(groups[0].values(), groups[1].values(), alt, params.conf_level)
        }
        Procedure::PairedWilcoxon => {
            testing::paired_wilcoxon(groups[0].values(), groups[1].values(), alt)
        }
        Procedure::OneWayAnova => {
            let refs: Vec<&[f64]> = groups.iter().map(Group::values).collect();
            testing::one_way_anova(&refs)
        }
        Procedure::KruskalWallis => {
            let refs: Vec<&[f64]> = groups.iter().map(Group::values).collect();
            testing::kruskal_wallis(&refs)
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation templates
// ---------------------------------------------------------------------------

// Table-driven text keyed by (shape family, significance, effect sign),
// so the output is reproducible and testable.
fn recommend(
    shape: TestShape,
    procedure: Procedure,
    outcome: &TestOutcome,
    groups: &[Group],
    params: &Parameters,
) -> String {
    let label = procedure.label();
    let p = format_p(outcome.p_value);
    let significant = outcome.p_value <= params.alpha;

    match shape {
        TestShape::OneSample => {
            let mu = params.mu;
            if significant {
                let center = if procedure.is_parametric() {
                    "mean"
                } else {
                    "median"
                };
                let dir = direction_word(outcome);
                format!(
                    "The sample differs significantly from {mu} ({label}, {p}); \
                     the sample {center} is {dir} than {mu}."
                )
            } else {
                format!("No significant difference from {mu} ({label}, {p}).")
            }
        }
        TestShape::TwoSample | TestShape::Paired => {
            let a = groups[0].name();
            let b = groups[1].name();
            if significant {
                let dir = direction_word(outcome);
                format!(
                    "'{a}' and '{b}' differ significantly ({label}, {p}); \
                     '{a}' is {dir} than '{b}'."
                )
            } else {
                format!("No significant difference between '{a}' and '{b}' ({label}, {p}).")
            }
        }
        TestShape::MultiGroup => {
            let k = groups.len();
            if significant {
                format!(
                    "At least one of the {k} groups differs significantly ({label}, {p}); \
                     see the pairwise comparisons."
                )
            } else {
                format!("No significant difference among the {k} groups ({label}, {p}).")
            }
        }
    }
}

fn direction_word(outcome: &TestOutcome) -> &'static str {
    match outcome.effect.signed_value() {
        Some(v) if v < 0.0 => "lower",
        _ => "higher",
    }
}

fn format_p(p: f64) -> String {
    if p < 1e-4 {
        "p < 0.0001".to_string()
    } else {
        format!("p = {p:.4}")
    }
}
