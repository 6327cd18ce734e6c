// File: src/core/pipeline.rs
//! Pre-fitted preprocessing applied to an assembled row before inference.

use crate::core::types::{ColumnKind, ColumnSpec, FeatureRow, FeatureValue, FeatureVector};
use crate::error::{ArtifactError, InferenceError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fitted transformation for a single input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTransform {
    /// `(x - mean) / scale`
    Standardize { mean: f64, scale: f64 },
    Passthrough,
    /// One output per category; unseen labels encode as all zeros.
    OneHot { categories: Vec<String> },
}

impl ColumnTransform {
    fn accepts(&self) -> ColumnKind {
        match self {
            ColumnTransform::Standardize { .. } | ColumnTransform::Passthrough => {
                ColumnKind::Numeric
            }
            ColumnTransform::OneHot { .. } => ColumnKind::Categorical,
        }
    }

    fn width(&self) -> usize {
        match self {
            ColumnTransform::OneHot { categories } => categories.len(),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStep {
    pub column: String,
    pub transform: ColumnTransform,
}

/// Fitted input schema plus the ordered column steps whose outputs are
/// concatenated into the feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingPipeline {
    schema: Vec<ColumnSpec>,
    steps: Vec<ColumnStep>,
}

impl PreprocessingPipeline {
    pub fn new(schema: Vec<ColumnSpec>, steps: Vec<ColumnStep>) -> Result<Self, ArtifactError> {
        let pipeline = Self { schema, steps };
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn schema(&self) -> &[ColumnSpec] {
        &self.schema
    }

    pub fn steps(&self) -> &[ColumnStep] {
        &self.steps
    }

    /// Length of the vectors produced by [`transform`](Self::transform).
    pub fn output_width(&self) -> usize {
        self.steps.iter().map(|s| s.transform.width()).sum()
    }

    /// Internal consistency of a loaded pipeline.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::invalid("pipeline", reason);

        if self.schema.is_empty() || self.steps.is_empty() {
            return Err(invalid("schema and steps must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for col in &self.schema {
            if !seen.insert(col.name.as_str()) {
                return Err(invalid(format!("duplicate schema column '{}'", col.name)));
            }
        }

        for step in &self.steps {
            let spec = self
                .schema
                .iter()
                .find(|c| c.name == step.column)
                .ok_or_else(|| invalid(format!("step uses unknown column '{}'", step.column)))?;
            if spec.kind != step.transform.accepts() {
                return Err(invalid(format!(
                    "column '{}' is {:?} but its step expects {:?}",
                    step.column,
                    spec.kind,
                    step.transform.accepts()
                )));
            }
            match &step.transform {
                ColumnTransform::Standardize { mean, scale } => {
                    if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                        return Err(invalid(format!(
                            "column '{}' has an unusable scaler (mean {mean}, scale {scale})",
                            step.column
                        )));
                    }
                }
                ColumnTransform::OneHot { categories } => {
                    let unique: HashSet<&String> = categories.iter().collect();
                    if categories.is_empty() || unique.len() != categories.len() {
                        return Err(invalid(format!(
                            "column '{}' needs a non-empty list of distinct categories",
                            step.column
                        )));
                    }
                }
                ColumnTransform::Passthrough => {}
            }
        }
        Ok(())
    }

    /// Checks a row against the fitted schema: same columns, same order,
    /// same value kinds. Nothing is coerced.
    pub fn check_schema(&self, row: &FeatureRow) -> Result<(), InferenceError> {
        let expected: Vec<&str> = self.schema.iter().map(|c| c.name.as_str()).collect();
        let actual: Vec<&str> = row.iter().map(|(n, _)| n).collect();

        if expected != actual {
            let missing: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|n| !actual.contains(n))
                .collect();
            let unexpected: Vec<&str> = actual
                .iter()
                .copied()
                .filter(|n| !expected.contains(n))
                .collect();
            let detail = if missing.is_empty() && unexpected.is_empty() {
                format!("columns out of order, expected {expected:?}, got {actual:?}")
            } else {
                format!("missing columns {missing:?}, unexpected columns {unexpected:?}")
            };
            return Err(InferenceError::SchemaMismatch(detail));
        }

        for (spec, (_, value)) in self.schema.iter().zip(row.iter()) {
            if spec.kind != value.kind() {
                return Err(InferenceError::SchemaMismatch(format!(
                    "column '{}' should be {:?} but got {:?}",
                    spec.name,
                    spec.kind,
                    value.kind()
                )));
            }
        }
        Ok(())
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<FeatureVector, InferenceError> {
        self.check_schema(row)?;

        let mut out = Vec::with_capacity(self.output_width());
        for step in &self.steps {
            // check_schema guarantees presence and kind.
            let value = row.get(&step.column).ok_or_else(|| {
                InferenceError::SchemaMismatch(format!("missing column '{}'", step.column))
            })?;
            match (&step.transform, value) {
                (ColumnTransform::Standardize { mean, scale }, FeatureValue::Number(x)) => {
                    out.push((x - mean) / scale)
                }
                (ColumnTransform::Passthrough, FeatureValue::Number(x)) => out.push(*x),
                (ColumnTransform::OneHot { categories }, FeatureValue::Text(label)) => {
                    out.extend(categories.iter().map(|c| if c == label { 1.0 } else { 0.0 }))
                }
                (_, other) => {
                    return Err(InferenceError::SchemaMismatch(format!(
                        "column '{}' got {:?} value",
                        step.column,
                        other.kind()
                    )))
                }
            }
        }
        Ok(FeatureVector(out))
    }
}
