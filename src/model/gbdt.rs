//! Gradient-boosted decision tree ensemble with a binary logistic objective.
//!
//! Each tree is a flat node array rooted at index 0. A sample goes to the left
//! child when `x[feature] < threshold`; a missing (NaN) value follows
//! `default_left`. The ensemble output is
//!
//! ```text
//! p = sigmoid(logit(base_score) + Σ leaf(tree, x))
//! ```

use crate::features::FEATURE_COUNT;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default = "default_left")]
        default_left: bool,
        /// Loss reduction recorded at training time, used for importances
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gain: Option<f64>,
    },
    Leaf {
        value: f64,
    },
}

fn default_left() -> bool {
    true
}

impl Node {
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Node::Split {
            feature,
            threshold,
            left,
            right,
            default_left: true,
            gain: None,
        }
    }

    pub fn leaf(value: f64) -> Self {
        Node::Leaf { value }
    }

    pub fn with_gain(self, g: f64) -> Self {
        match self {
            Node::Split {
                feature,
                threshold,
                left,
                right,
                default_left,
                ..
            } => Node::Split {
                feature,
                threshold,
                left,
                right,
                default_left,
                gain: Some(g),
            },
            leaf => leaf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Children must point forward within the array, so traversal always terminates.
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    gain,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {} splits on unknown feature {}", i, feature));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {} has a NaN threshold", i));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= len {
                            return Err(format!("node {} has invalid child index {}", i, child));
                        }
                    }
                    if gain.map_or(false, |g| !g.is_finite() || g < 0.0) {
                        return Err(format!("node {} has an invalid gain", i));
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has a non-finite value", i));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn leaf_value(&self, x: ArrayView1<'_, f64>) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                    ..
                } => {
                    let v = x[*feature];
                    idx = if v.is_nan() {
                        if *default_left {
                            *left
                        } else {
                            *right
                        }
                    } else if v < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn splits(&self) -> impl Iterator<Item = (usize, Option<f64>)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            Node::Split { feature, gain, .. } => Some((*feature, *gain)),
            Node::Leaf { .. } => None,
        })
    }
}

/// On-disk form of the trained ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub base_score: f64,
    pub trees: Vec<Tree>,
    /// Importances exported by the training library; derived from the trees when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct GradientBoostedClassifier {
    base_margin: f64,
    trees: Vec<Tree>,
    importances: [f64; FEATURE_COUNT],
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

impl GradientBoostedClassifier {
    pub fn new(base_score: f64, trees: Vec<Tree>) -> Result<Self, String> {
        Self::build(base_score, trees, None)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, String> {
        Self::build(artifact.base_score, artifact.trees, artifact.feature_importances)
    }

    fn build(
        base_score: f64,
        trees: Vec<Tree>,
        explicit_importances: Option<Vec<f64>>,
    ) -> Result<Self, String> {
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(format!("base_score {} is not within (0, 1)", base_score));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {}: {}", i, e))?;
        }
        let importances = match explicit_importances {
            Some(v) => {
                if v.len() != FEATURE_COUNT {
                    return Err(format!(
                        "expected {} feature importances, got {}",
                        FEATURE_COUNT,
                        v.len()
                    ));
                }
                if v.iter().any(|x| !x.is_finite() || *x < 0.0) {
                    return Err("feature importances must be finite and non-negative".to_string());
                }
                let mut out = [0.0; FEATURE_COUNT];
                out.copy_from_slice(&v);
                out
            }
            None => derive_importances(&trees),
        };
        Ok(Self {
            base_margin: logit(base_score),
            trees,
            importances,
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw ensemble score before the logistic link
    pub fn margin(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.base_margin + self.trees.iter().map(|t| t.leaf_value(x)).sum::<f64>()
    }

    /// `[P(healthy), P(failure)]` for one scaled sample
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> [f64; 2] {
        let p = sigmoid(self.margin(x)).clamp(0.0, 1.0);
        [1.0 - p, p]
    }

    /// Probability of the positive (failure) class
    pub fn predict_positive(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.predict_proba(x)[1]
    }

    /// Global per-feature importance in training order, summing to 1 unless the model has no splits
    pub fn feature_importances(&self) -> [f64; FEATURE_COUNT] {
        self.importances
    }
}

/// Average gain per feature when every split carries one, otherwise split counts; normalized.
fn derive_importances(trees: &[Tree]) -> [f64; FEATURE_COUNT] {
    let mut counts = [0.0f64; FEATURE_COUNT];
    let mut gains = [0.0f64; FEATURE_COUNT];
    let mut all_have_gain = true;
    for (feature, gain) in trees.iter().flat_map(Tree::splits) {
        counts[feature] += 1.0;
        match gain {
            Some(g) => gains[feature] += g,
            None => all_have_gain = false,
        }
    }

    let mut raw = [0.0f64; FEATURE_COUNT];
    for i in 0..FEATURE_COUNT {
        raw[i] = if !all_have_gain {
            counts[i]
        } else if counts[i] > 0.0 {
            gains[i] / counts[i]
        } else {
            0.0
        };
    }
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        for v in raw.iter_mut() {
            *v /= total;
        }
    }
    raw
}
