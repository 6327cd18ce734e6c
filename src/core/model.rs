// File: src/core/model.rs
use crate::core::types::FeatureVector;
use crate::error::{ArtifactError, InferenceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

/// A regression tree stored as a flat node arena; node 0 is the root and
/// children always sit after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature} of {n_features}"));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} points to invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} is not finite"));
                    }
                }
            }
        }
        Ok(())
    }

    /// O(depth). Terminates because children are strictly after parents.
    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => idx = if x[feature] <= threshold { left } else { right },
            }
        }
    }
}

/// Fitted regression model exported by the training side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionModel {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Averages the trees' outputs.
    Forest {
        n_features: usize,
        trees: Vec<RegressionTree>,
    },
}

impl RegressionModel {
    pub fn n_features(&self) -> usize {
        match self {
            RegressionModel::Linear { coefficients, .. } => coefficients.len(),
            RegressionModel::Forest { n_features, .. } => *n_features,
        }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::invalid("model", reason);
        match self {
            RegressionModel::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    return Err(invalid("linear model has no coefficients".into()));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(invalid("linear model has non-finite weights".into()));
                }
            }
            RegressionModel::Forest { n_features, trees } => {
                if *n_features == 0 || trees.is_empty() {
                    return Err(invalid("forest needs features and at least one tree".into()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(*n_features)
                        .map_err(|reason| invalid(format!("tree {i}: {reason}")))?;
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                actual: features.len(),
            });
        }
        let x = features.as_slice();

        let estimate = match self {
            RegressionModel::Linear {
                coefficients,
                intercept,
            } => intercept + coefficients.iter().zip(x).map(|(w, v)| w * v).sum::<f64>(),
            RegressionModel::Forest { trees, .. } => {
                trees.iter().map(|t| t.evaluate(x)).sum::<f64>() / trees.len() as f64
            }
        };

        if estimate.is_finite() {
            Ok(estimate)
        } else {
            Err(InferenceError::NonFinite(estimate))
        }
    }
}
