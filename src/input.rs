//! Input normalization.
//!
//! Funnels every accepted input shape — a single vector, a pair of
//! vectors, an explicit group list, or a grouping column over tabular
//! values — into one canonical form: an ordered list of named [`Group`]s
//! plus the derived [`TestShape`]. All format sniffing happens here, so
//! the decision engine downstream only ever sees canonical groups.
//!
//! Missing values (`NaN`) are removed and the removal is logged at debug
//! level; it is not an error. Remaining non-finite values, undersized
//! groups, and malformed paired requests are errors.

use log::debug;
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Minimum observations per group: the normality gate needs 3.
pub const MIN_GROUP_SIZE: usize = 3;

/// A named, immutable sample of finite values.
///
/// Groups are only constructed by the normalizer (and by tests); once
/// built they are never mutated. Insertion order of groups is preserved
/// throughout the analysis because it drives pairwise enumeration and
/// plot ordering downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    name: String,
    values: Vec<f64>,
}

impl Group {
    /// Builds a group. Callers are expected to pass cleaned data; the
    /// normalizer is the canonical producer.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Declared test shape, derived from input arity and the paired flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestShape {
    /// One group tested against a hypothesized mean.
    OneSample,
    /// Two independent groups.
    TwoSample,
    /// Two dependent groups of equal length.
    Paired,
    /// Three or more independent groups.
    MultiGroup,
}

/// Raw data in any of the accepted input shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// A single sample.
    Single(Vec<f64>),
    /// Two samples (independent, or paired when `paired = true`).
    Pair(Vec<f64>, Vec<f64>),
    /// An explicit ordered list of samples.
    Groups(Vec<Vec<f64>>),
    /// A value column split by a parallel grouping column. Groups are
    /// ordered by first appearance of each label.
    Table {
        /// Numeric values.
        values: Vec<f64>,
        /// Group label per value; must match `values` in length.
        labels: Vec<String>,
    },
}

/// Normalizes raw input into ordered groups plus the test shape.
///
/// `group_names`, when supplied, overrides the default `group1..groupK`
/// names and must match the group count exactly. Table input takes its
/// names from the grouping column and rejects an override.
///
/// # Errors
///
/// - [`AnalysisError::InvalidShape`] for mismatched paired lengths,
///   paired requests over anything but exactly two vectors, empty group
///   lists, or a wrong-length name override.
/// - [`AnalysisError::InsufficientData`] when a cleaned group has fewer
///   than [`MIN_GROUP_SIZE`] observations.
/// - [`AnalysisError::DegenerateInput`] when a value is infinite after
///   missing-value removal.
pub fn normalize(
    data: &DataSource,
    group_names: Option<&[String]>,
    paired: bool,
) -> Result<(Vec<Group>, TestShape)> {
    match data {
        DataSource::Single(x) => {
            if paired {
                return Err(AnalysisError::InvalidShape(
                    "paired analysis requires exactly two samples, got one".into(),
                ));
            }
            let names = resolve_names(group_names, 1)?;
            let g = Group::new(names[0].clone(), clean_series(&names[0], x)?);
            Ok((vec![g], TestShape::OneSample))
        }
        DataSource::Pair(x, y) => {
            let names = resolve_names(group_names, 2)?;
            normalize_pair(x, y, &names[0], &names[1], paired)
        }
        DataSource::Groups(list) => {
            if list.is_empty() {
                return Err(AnalysisError::InvalidShape("empty group list".into()));
            }
            let names = resolve_names(group_names, list.len())?;
            match list.len() {
                1 => {
                    if paired {
                        return Err(AnalysisError::InvalidShape(
                            "paired analysis requires exactly two samples, got one".into(),
                        ));
                    }
                    let g = Group::new(names[0].clone(), clean_series(&names[0], &list[0])?);
                    Ok((vec![g], TestShape::OneSample))
                }
                2 => normalize_pair(&list[0], &list[1], &names[0], &names[1], paired),
                k => {
                    if paired {
                        return Err(AnalysisError::InvalidShape(format!(
                            "paired analysis requires exactly two samples, got {k}"
                        )));
                    }
                    let mut groups = Vec::with_capacity(k);
                    for (name, raw) in names.iter().zip(list.iter()) {
                        groups.push(Group::new(name.clone(), clean_series(name, raw)?));
                    }
                    Ok((groups, TestShape::MultiGroup))
                }
            }
        }
        DataSource::Table { values, labels } => {
            if paired {
                return Err(AnalysisError::InvalidShape(
                    "paired analysis requires two explicit vectors, not a grouping column".into(),
                ));
            }
            if group_names.is_some() {
                return Err(AnalysisError::InvalidShape(
                    "table input takes group names from the grouping column".into(),
                ));
            }
            normalize_table(values, labels)
        }
    }
}

fn normalize_pair(
    x: &[f64],
    y: &[f64],
    name_x: &str,
    name_y: &str,
    paired: bool,
) -> Result<(Vec<Group>, TestShape)> {
    if paired {
        if x.len() != y.len() {
            return Err(AnalysisError::InvalidShape(format!(
                "paired samples must have equal length, got {} and {}",
                x.len(),
                y.len()
            )));
        }
        let (cx, cy) = clean_pairs(name_x, name_y, x, y)?;
        let groups = vec![Group::new(name_x, cx), Group::new(name_y, cy)];
        Ok((groups, TestShape::Paired))
    } else {
        let groups = vec![
            Group::new(name_x, clean_series(name_x, x)?),
            Group::new(name_y, clean_series(name_y, y)?),
        ];
        Ok((groups, TestShape::TwoSample))
    }
}

fn normalize_table(values: &[f64], labels: &[String]) -> Result<(Vec<Group>, TestShape)> {
    if values.len() != labels.len() {
        return Err(AnalysisError::InvalidShape(format!(
            "value column ({}) and grouping column ({}) differ in length",
            values.len(),
            labels.len()
        )));
    }

    // First-appearance order of labels.
    let mut buckets: Vec<(String, Vec<f64>)> = Vec::new();
    for (&v, label) in values.iter().zip(labels.iter()) {
        match buckets.iter_mut().find(|(name, _)| name == label) {
            Some((_, bucket)) => bucket.push(v),
            None => buckets.push((label.clone(), vec![v])),
        }
    }

    let mut groups = Vec::with_capacity(buckets.len());
    for (name, raw) in &buckets {
        groups.push(Group::new(name.clone(), clean_series(name, raw)?));
    }

    let shape = match groups.len() {
        1 => TestShape::OneSample,
        2 => TestShape::TwoSample,
        _ => TestShape::MultiGroup,
    };
    Ok((groups, shape))
}

// Drop NaN (missing), reject infinities, enforce the minimum size.
fn clean_series(name: &str, raw: &[f64]) -> Result<Vec<f64>> {
    let cleaned: Vec<f64> = raw.iter().copied().filter(|v| !v.is_nan()).collect();
    let removed = raw.len() - cleaned.len();
    if removed > 0 {
        debug!("group '{name}': removed {removed} missing value(s)");
    }
    if let Some(bad) = cleaned.iter().find(|v| !v.is_finite()) {
        return Err(AnalysisError::DegenerateInput(format!(
            "group '{name}' contains a non-finite value ({bad})"
        )));
    }
    if cleaned.len() < MIN_GROUP_SIZE {
        return Err(AnalysisError::InsufficientData {
            group: name.to_string(),
            n: cleaned.len(),
            min: MIN_GROUP_SIZE,
        });
    }
    Ok(cleaned)
}

// Pairwise missing removal: a pair is dropped when either side is NaN.
fn clean_pairs(
    name_x: &str,
    name_y: &str,
    x: &[f64],
    y: &[f64],
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut cx = Vec::with_capacity(x.len());
    let mut cy = Vec::with_capacity(y.len());
    for (&a, &b) in x.iter().zip(y.iter()) {
        if a.is_nan() || b.is_nan() {
            continue;
        }
        cx.push(a);
        cy.push(b);
    }
    let removed = x.len() - cx.len();
    if removed > 0 {
        debug!("paired samples '{name_x}'/'{name_y}': removed {removed} incomplete pair(s)");
    }
    for (name, series) in [(name_x, &cx), (name_y, &cy)] {
        if let Some(bad) = series.iter().find(|v| !v.is_finite()) {
            return Err(AnalysisError::DegenerateInput(format!(
                "group '{name}' contains a non-finite value ({bad})"
            )));
        }
    }
    if cx.len() < MIN_GROUP_SIZE {
        return Err(AnalysisError::InsufficientData {
            group: format!("{name_x}/{name_y}"),
            n: cx.len(),
            min: MIN_GROUP_SIZE,
        });
    }
    Ok((cx, cy))
}

fn resolve_names(group_names: Option<&[String]>, k: usize) -> Result<Vec<String>> {
    match group_names {
        Some(names) => {
            if names.len() != k {
                return Err(AnalysisError::InvalidShape(format!(
                    "{} group name(s) supplied for {k} group(s)",
                    names.len()
                )));
            }
            Ok(names.to_vec())
        }
        None => Ok((1..=k).map(|i| format!("group{i}")).collect()),
    }
}
