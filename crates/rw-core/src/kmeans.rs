//! Seeded 1-D k-means clustering.
//!
//! Lloyd's algorithm with k-means++ initialization and `n_init` restarts,
//! keeping the run with the lowest inertia. Operates on already-scaled
//! single-feature samples; the cluster detector owns the scaler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const MAX_ITERATIONS: usize = 100;
const CONVERGENCE_TOL: f64 = 1e-6;

/// Fitted k-means model over one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    /// Requested cluster count; the effective count is capped at the
    /// sample count during fit.
    pub n_clusters: usize,
    /// Seed for reproducible initialization.
    pub seed: u64,
    /// Number of restarts; the best inertia wins.
    pub n_init: usize,
    /// Fitted cluster centers (empty until fit).
    pub centers: Vec<f64>,
}

impl KMeans {
    pub fn new(n_clusters: usize, seed: u64, n_init: usize) -> Self {
        Self {
            n_clusters,
            seed,
            n_init,
            centers: Vec::new(),
        }
    }

    /// Fit centers on scaled samples.
    ///
    /// A no-op on empty input. With fewer samples than clusters the
    /// effective cluster count shrinks to the sample count.
    pub fn fit(&mut self, data: &[f64]) {
        if data.is_empty() {
            return;
        }
        let k = self.n_clusters.max(1).min(data.len());

        let mut best_centers = Vec::new();
        let mut best_inertia = f64::INFINITY;

        for run in 0..self.n_init.max(1) {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(run as u64));
            let mut centers = plus_plus_init(data, k, &mut rng);
            let inertia = lloyd(data, &mut centers);
            if inertia < best_inertia {
                best_inertia = inertia;
                best_centers = centers;
            }
        }

        self.centers = best_centers;
    }

    /// Index of the nearest fitted center.
    ///
    /// Returns 0 when unfitted; callers gate on `is_fitted`.
    pub fn predict(&self, x: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in self.centers.iter().enumerate() {
            let d = (x - c).abs();
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    pub fn is_fitted(&self) -> bool {
        !self.centers.is_empty()
    }
}

/// k-means++ seeding: later centers are drawn with probability
/// proportional to squared distance from the nearest existing center.
fn plus_plus_init(data: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centers = Vec::with_capacity(k);
    centers.push(data[rng.random_range(0..data.len())]);

    while centers.len() < k {
        let sq_dists: Vec<f64> = data
            .iter()
            .map(|&x| {
                let d = nearest_distance(&centers, x);
                d * d
            })
            .collect();
        let total: f64 = sq_dists.iter().sum();
        if total <= 0.0 {
            // All remaining points coincide with a center; duplicate one.
            centers.push(centers[0]);
            continue;
        }
        let mut target = rng.random_range(0.0..total);
        let mut chosen = data.len() - 1;
        for (i, &sd) in sq_dists.iter().enumerate() {
            if target < sd {
                chosen = i;
                break;
            }
            target -= sd;
        }
        centers.push(data[chosen]);
    }
    centers
}

/// Lloyd iterations until convergence; returns the final inertia.
fn lloyd(data: &[f64], centers: &mut Vec<f64>) -> f64 {
    let k = centers.len();
    let mut assignments = vec![0usize; data.len()];

    for _ in 0..MAX_ITERATIONS {
        for (i, &x) in data.iter().enumerate() {
            assignments[i] = nearest_index(centers, x);
        }

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (i, &x) in data.iter().enumerate() {
            sums[assignments[i]] += x;
            counts[assignments[i]] += 1;
        }

        let mut shift = 0.0f64;
        for c in 0..k {
            if counts[c] == 0 {
                // Empty cluster: reseed to the point farthest from its
                // assigned center.
                let far = data
                    .iter()
                    .cloned()
                    .max_by(|a, b| {
                        nearest_distance(centers, *a).total_cmp(&nearest_distance(centers, *b))
                    })
                    .unwrap_or(centers[c]);
                shift = shift.max((centers[c] - far).abs());
                centers[c] = far;
                continue;
            }
            let new_center = sums[c] / counts[c] as f64;
            shift = shift.max((centers[c] - new_center).abs());
            centers[c] = new_center;
        }

        if shift < CONVERGENCE_TOL {
            break;
        }
    }

    data.iter()
        .map(|&x| {
            let d = nearest_distance(centers, x);
            d * d
        })
        .sum()
}

fn nearest_index(centers: &[f64], x: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = (x - c).abs();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn nearest_distance(centers: &[f64], x: f64) -> f64 {
    centers
        .iter()
        .map(|c| (x - c).abs())
        .fold(f64::INFINITY, f64::min)
}
