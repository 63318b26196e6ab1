//! Test selection.
//!
//! A pure decision function from (test shape, aggregate normality
//! verdict) to the concrete procedure. The match is total over both
//! enums, so every combination maps to exactly one procedure and an
//! unmapped input is unrepresentable.

use serde::Serialize;

use crate::input::TestShape;

/// The statistical procedure chosen for an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Procedure {
    /// One-sample Student's t-test against `mu`.
    OneSampleT,
    /// One-sample Wilcoxon signed-rank test against `mu`.
    OneSampleWilcoxon,
    /// Welch two-sample t-test.
    TwoSampleT,
    /// Wilcoxon rank-sum (Mann-Whitney U) test.
    RankSum,
    /// Paired t-test.
    PairedT,
    /// Paired Wilcoxon signed-rank test.
    PairedWilcoxon,
    /// One-way ANOVA F-test.
    OneWayAnova,
    /// Kruskal-Wallis H-test.
    KruskalWallis,
}

impl Procedure {
    /// Whether the procedure belongs to the parametric family.
    pub fn is_parametric(self) -> bool {
        matches!(
            self,
            Self::OneSampleT | Self::TwoSampleT | Self::PairedT | Self::OneWayAnova
        )
    }

    /// Human-readable name, used by the recommendation templates.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneSampleT => "one-sample t-test",
            Self::OneSampleWilcoxon => "Wilcoxon signed-rank test",
            Self::TwoSampleT => "Welch two-sample t-test",
            Self::RankSum => "Wilcoxon rank-sum test",
            Self::PairedT => "paired t-test",
            Self::PairedWilcoxon => "paired Wilcoxon signed-rank test",
            Self::OneWayAnova => "one-way ANOVA",
            Self::KruskalWallis => "Kruskal-Wallis H-test",
        }
    }
}

/// The selected procedure together with the normality verdict that
/// produced it, so consumers can see *why* a branch was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectedProcedure {
    /// The chosen procedure.
    pub procedure: Procedure,
    /// Aggregate normality verdict at selection time.
    pub all_normal: bool,
}

/// Maps (shape, aggregate normality) to a procedure.
///
/// | Shape | Normal | Procedure |
/// |---|---|---|
/// | one-sample | yes | one-sample t-test |
/// | one-sample | no | Wilcoxon signed-rank |
/// | two-sample | yes | Welch t-test |
/// | two-sample | no | Wilcoxon rank-sum |
/// | paired | yes | paired t-test |
/// | paired | no | paired Wilcoxon signed-rank |
/// | multi-group | yes | one-way ANOVA |
/// | multi-group | no | Kruskal-Wallis |
pub fn select(shape: TestShape, all_normal: bool) -> SelectedProcedure {
    let procedure = match (shape, all_normal) {
        (TestShape::OneSample, true) => Procedure::OneSampleT,
        (TestShape::OneSample, false) => Procedure::OneSampleWilcoxon,
        (TestShape::TwoSample, true) => Procedure::TwoSampleT,
        (TestShape::TwoSample, false) => Procedure::RankSum,
        (TestShape::Paired, true) => Procedure::PairedT,
        (TestShape::Paired, false) => Procedure::PairedWilcoxon,
        (TestShape::MultiGroup, true) => Procedure::OneWayAnova,
        (TestShape::MultiGroup, false) => Procedure::KruskalWallis,
    };
    SelectedProcedure {
        procedure,
        all_normal,
    }
}
