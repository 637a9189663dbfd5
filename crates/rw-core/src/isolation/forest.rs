//! Isolation forest model.
//!
//! Seeded ensemble of random isolation trees over row-major samples.
//! Scores follow the sklearn `score_samples` convention: values are <= 0
//! and lower means more anomalous. The decision offset is fixed at fit
//! time as the contamination quantile of the training scores.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Euler-Mascheroni constant, used in the average path length correction.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// One node of an isolation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Internal {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

/// A single random isolation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn build(rows: &[Vec<f64>], indices: &[usize], max_depth: usize, rng: &mut StdRng) -> Self {
        Self {
            root: build_node(rows, indices, 0, max_depth, rng),
        }
    }

    fn path_length(&self, sample: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[*feature] < *threshold { left } else { right };
                    depth += 1;
                }
            }
        }
    }
}

fn build_node(
    rows: &[Vec<f64>],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= max_depth || indices.len() <= 1 {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    let n_features = rows[indices[0]].len();
    let feature = rng.random_range(0..n_features);

    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;
    for &i in indices {
        min_val = min_val.min(rows[i][feature]);
        max_val = max_val.max(rows[i][feature]);
    }
    if !(max_val - min_val).is_finite() || max_val - min_val < 1e-10 {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    let threshold = rng.random_range(min_val..max_val);
    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
        indices.iter().partition(|&&i| rows[i][feature] < threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    Node::Internal {
        feature,
        threshold,
        left: Box::new(build_node(rows, &left_idx, depth + 1, max_depth, rng)),
        right: Box::new(build_node(rows, &right_idx, depth + 1, max_depth, rng)),
    }
}

/// Expected path length of an unsuccessful BST search over `n` items.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Fitted isolation forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Subsample size per tree.
    pub max_samples: usize,
    /// Expected anomaly fraction; sets the decision offset at fit time.
    pub contamination: f64,
    /// Seed for reproducible tree construction.
    pub seed: u64,
    /// Effective subsample size after capping at the training size.
    subsample: usize,
    trees: Vec<IsolationTree>,
    /// Score threshold below which a point is labeled anomalous.
    offset: f64,
}

impl IsolationForest {
    pub fn new(n_estimators: usize, max_samples: usize, contamination: f64, seed: u64) -> Self {
        Self {
            n_estimators,
            max_samples,
            contamination,
            seed,
            subsample: 0,
            trees: Vec::new(),
            offset: -0.5,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fit the ensemble on row-major samples.
    ///
    /// A no-op on empty input. After building the trees, the decision
    /// offset is set to the contamination quantile of the training scores.
    pub fn fit(&mut self, rows: &[Vec<f64>]) {
        if rows.is_empty() {
            return;
        }
        let n = rows.len();
        self.subsample = self.max_samples.min(n).max(1);
        let max_depth = (self.subsample as f64).log2().ceil().max(1.0) as usize;

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.trees = (0..self.n_estimators)
            .map(|_| {
                let indices = sample_indices(n, self.subsample, &mut rng);
                IsolationTree::build(rows, &indices, max_depth, &mut rng)
            })
            .collect();

        let scores = self.score_samples(rows);
        self.offset = rw_math::percentile(&scores, self.contamination * 100.0);
    }

    /// Per-sample scores; <= 0, lower = more anomalous.
    pub fn score_samples(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        let c = average_path_length(self.subsample);
        rows.iter()
            .map(|sample| {
                if self.trees.is_empty() || c <= 0.0 {
                    return -0.5;
                }
                let avg_path: f64 = self
                    .trees
                    .iter()
                    .map(|tree| tree.path_length(sample))
                    .sum::<f64>()
                    / self.trees.len() as f64;
                -(2.0f64.powf(-avg_path / c))
            })
            .collect()
    }

    /// ±1 labels against the fitted offset (-1 = anomaly).
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<i8> {
        self.score_samples(rows)
            .iter()
            .map(|&s| if s < self.offset { crate::LABEL_ANOMALY } else { crate::LABEL_NORMAL })
            .collect()
    }
}

/// Draw `amount` distinct indices from `0..n` (all of them when n <= amount).
fn sample_indices(n: usize, amount: usize, rng: &mut StdRng) -> Vec<usize> {
    if amount >= n {
        return (0..n).collect();
    }
    rand::seq::index::sample(rng, n, amount).into_vec()
}
