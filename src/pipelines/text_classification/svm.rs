//! RBF-kernel support vector machines trained with Sequential Minimal Optimization.
//!
//! Each pair of classes gets its own binary machine over a precomputed kernel matrix, and
//! prediction is a one-vs-one vote. Rows may be any width, so wide bag-of-words matrices with
//! more terms than documents are fine.

use derive_new::new;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    model::{Classifier, ModelError},
    vectorizer::Features,
};

/// Regularization strength
pub const C: f64 = 1.0;

/// KKT violation tolerance
pub const TOLERANCE: f64 = 1e-3;

/// Full sweeps without any update before the optimizer stops
const MAX_QUIET_PASSES: usize = 5;

/// Upper bound on sweeps over the training rows
const MAX_ITER: usize = 1000;

/// Dual coefficients below this are not support vectors
const SUPPORT_EPSILON: f64 = 1e-8;

/// Optimizer settings shared by every pair of classes
#[derive(Clone, Debug, PartialEq, new)]
pub struct SvmParameters {
    /// RBF width, `K(a, b) = exp(-gamma * |a - b|^2)`
    pub gamma: f64,

    /// Regularization strength
    #[new(value = "C")]
    pub c: f64,

    /// KKT violation tolerance
    #[new(value = "TOLERANCE")]
    pub tolerance: f64,

    /// Seed for the second-coefficient choice
    #[new(value = "0")]
    pub seed: u64,
}

impl SvmParameters {
    /// The RBF width scaled to the training matrix, as `1 / (n_features * var(X))`
    pub fn scaled(features: &Features) -> Self {
        Self::new(scale_gamma(features))
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn kernel(&self, a: &[f64], b: &[f64]) -> f64 {
        let distance: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();

        (-self.gamma * distance).exp()
    }
}

/// A binary machine separating `negative` (label -1) from `positive` (label 1)
#[derive(Clone, Debug)]
struct BinaryMachine {
    negative: usize,
    positive: usize,
    support_vectors: Features,

    /// `alpha_i * y_i` for each support vector
    coefficients: Vec<f64>,
    bias: f64,
}

impl BinaryMachine {
    fn decision(&self, parameters: &SvmParameters, row: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.coefficients)
            .map(|(sv, coefficient)| coefficient * parameters.kernel(sv, row))
            .sum::<f64>()
            + self.bias
    }
}

/// One-vs-one support vector machines; ties go to the lowest class code
#[derive(Clone, Debug)]
pub struct Svm {
    n_classes: usize,
    parameters: SvmParameters,
    machines: Vec<BinaryMachine>,
}

impl Svm {
    /// Fit one binary machine for every pair of classes that both have training rows
    pub fn fit(
        features: &Features,
        labels: &[usize],
        n_classes: usize,
        parameters: SvmParameters,
    ) -> Result<Self, ModelError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(ModelError::Shape {
                rows: features.len(),
                labels: labels.len(),
            });
        }

        let mut machines = Vec::new();

        for negative in 0..n_classes {
            for positive in negative + 1..n_classes {
                let (rows, y): (Features, Vec<f64>) = features
                    .iter()
                    .zip(labels)
                    .filter_map(|(row, &label)| match label {
                        l if l == negative => Some((row.clone(), -1.0)),
                        l if l == positive => Some((row.clone(), 1.0)),
                        _ => None,
                    })
                    .unzip();

                // A class with no training rows never wins a vote
                if !y.contains(&-1.0) || !y.contains(&1.0) {
                    continue;
                }

                let seed = parameters.seed.wrapping_add(machines.len() as u64);
                let (alphas, bias) = smo(&rows, &y, &parameters, seed);

                let (support_vectors, coefficients): (Features, Vec<f64>) = rows
                    .into_iter()
                    .zip(alphas.iter().zip(&y))
                    .filter(|(_, (alpha, _))| **alpha > SUPPORT_EPSILON)
                    .map(|(row, (alpha, y))| (row, alpha * y))
                    .unzip();

                machines.push(BinaryMachine {
                    negative,
                    positive,
                    support_vectors,
                    coefficients,
                    bias,
                });
            }
        }

        debug!(
            "SVM gamma {}, {} one-vs-one machines, {} support vectors",
            parameters.gamma,
            machines.len(),
            machines.iter().map(|m| m.support_vectors.len()).sum::<usize>()
        );

        Ok(Self {
            n_classes,
            parameters,
            machines,
        })
    }
}

impl Classifier for Svm {
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError> {
        Ok(features
            .iter()
            .map(|row| {
                let mut votes = vec![0usize; self.n_classes];

                for machine in &self.machines {
                    let winner = if machine.decision(&self.parameters, row) > 0.0 {
                        machine.positive
                    } else {
                        machine.negative
                    };
                    votes[winner] += 1;
                }

                votes
                    .iter()
                    .enumerate()
                    .fold((0, 0), |best, (code, &count)| {
                        if count > best.1 {
                            (code, count)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }
}

/// Simplified SMO over a precomputed kernel matrix. Returns the dual coefficients and the bias.
fn smo(rows: &Features, y: &[f64], parameters: &SvmParameters, seed: u64) -> (Vec<f64>, f64) {
    let n = rows.len();
    let c = parameters.c;
    let tol = parameters.tolerance;

    let kernel: Vec<Vec<f64>> = rows
        .iter()
        .map(|a| rows.iter().map(|b| parameters.kernel(a, b)).collect())
        .collect();

    let mut alphas = vec![0.0; n];
    let mut bias = 0.0;
    let mut rng = StdRng::seed_from_u64(seed);

    let error = |alphas: &[f64], bias: f64, i: usize| -> f64 {
        let decision: f64 = (0..n).map(|t| alphas[t] * y[t] * kernel[t][i]).sum();
        decision + bias - y[i]
    };

    let mut passes = 0;
    let mut iterations = 0;

    while n > 1 && passes < MAX_QUIET_PASSES && iterations < MAX_ITER {
        let mut changed = 0;

        for i in 0..n {
            let e_i = error(&alphas, bias, i);

            let violates =
                (y[i] * e_i < -tol && alphas[i] < c) || (y[i] * e_i > tol && alphas[i] > 0.0);
            if !violates {
                continue;
            }

            let j = loop {
                let j = rng.gen_range(0..n);
                if j != i {
                    break j;
                }
            };
            let e_j = error(&alphas, bias, j);

            let (alpha_i_old, alpha_j_old) = (alphas[i], alphas[j]);

            let (low, high) = if y[i] != y[j] {
                ((alpha_j_old - alpha_i_old).max(0.0), (c + alpha_j_old - alpha_i_old).min(c))
            } else {
                ((alpha_i_old + alpha_j_old - c).max(0.0), (alpha_i_old + alpha_j_old).min(c))
            };
            if (high - low).abs() < 1e-10 {
                continue;
            }

            let eta = 2.0 * kernel[i][j] - kernel[i][i] - kernel[j][j];
            if eta >= 0.0 {
                continue;
            }

            alphas[j] = (alpha_j_old - y[j] * (e_i - e_j) / eta).max(low).min(high);
            if (alphas[j] - alpha_j_old).abs() < 1e-5 {
                continue;
            }

            alphas[i] = alpha_i_old + y[i] * y[j] * (alpha_j_old - alphas[j]);

            let delta_i = y[i] * (alphas[i] - alpha_i_old);
            let delta_j = y[j] * (alphas[j] - alpha_j_old);
            let b1 = bias - e_i - delta_i * kernel[i][i] - delta_j * kernel[i][j];
            let b2 = bias - e_j - delta_i * kernel[i][j] - delta_j * kernel[j][j];

            bias = if alphas[i] > 0.0 && alphas[i] < c {
                b1
            } else if alphas[j] > 0.0 && alphas[j] < c {
                b2
            } else {
                (b1 + b2) / 2.0
            };

            changed += 1;
        }

        iterations += 1;
        passes = if changed == 0 { passes + 1 } else { 0 };
    }

    if iterations == MAX_ITER {
        warn!("SMO stopped after {} sweeps without converging", MAX_ITER);
    }

    (alphas, bias)
}

/// `1 / (n_features * var(X))`, or 1 for a constant matrix
fn scale_gamma(features: &Features) -> f64 {
    let n_features = features.first().map_or(0, Vec::len);
    let n = (features.len() * n_features) as f64;

    if n == 0.0 {
        return 1.0;
    }

    let mean = features.iter().flatten().sum::<f64>() / n;
    let variance = features
        .iter()
        .flatten()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / n;

    if variance > 0.0 {
        1.0 / (n_features as f64 * variance)
    } else {
        1.0
    }
}
