use super::{
    model::{Classifier, ModelError},
    vectorizer::Features,
};

/// Laplace smoothing
pub const ALPHA: f64 = 1.0;

/// Multinomial Naive Bayes over non-negative term weights, raw counts or TF-IDF alike
#[derive(Clone, Debug)]
pub struct MultinomialNaiveBayes {
    /// Log prior of each class code, `-inf` for a class with no training rows
    class_log_priors: Vec<f64>,

    /// Log probability of each feature, per class code
    feature_log_probs: Vec<Vec<f64>>,
}

impl MultinomialNaiveBayes {
    /// Fit on rows labelled with codes `0..n_classes`
    pub fn fit(
        features: &Features,
        labels: &[usize],
        n_classes: usize,
        alpha: f64,
    ) -> Result<Self, ModelError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(ModelError::Shape {
                rows: features.len(),
                labels: labels.len(),
            });
        }

        let n_features = features[0].len();
        let mut class_counts = vec![0usize; n_classes];
        let mut feature_totals = vec![vec![alpha; n_features]; n_classes];

        for (row, &label) in features.iter().zip(labels) {
            let totals = feature_totals
                .get_mut(label)
                .ok_or(ModelError::UnknownClass(label))?;

            class_counts[label] += 1;
            for (total, &value) in totals.iter_mut().zip(row) {
                *total += value.max(0.0);
            }
        }

        let n_samples = features.len() as f64;
        let class_log_priors = class_counts
            .iter()
            .map(|&count| (count as f64 / n_samples).ln())
            .collect();

        let feature_log_probs = feature_totals
            .into_iter()
            .map(|totals| {
                let sum: f64 = totals.iter().sum();
                totals.iter().map(|total| (total / sum).ln()).collect()
            })
            .collect();

        Ok(Self {
            class_log_priors,
            feature_log_probs,
        })
    }

    /// Joint log likelihood of each class code for one row
    pub fn log_likelihoods(&self, row: &[f64]) -> Vec<f64> {
        self.class_log_priors
            .iter()
            .zip(&self.feature_log_probs)
            .map(|(prior, log_probs)| {
                prior
                    + row
                        .iter()
                        .zip(log_probs)
                        .map(|(value, log_p)| value * log_p)
                        .sum::<f64>()
            })
            .collect()
    }
}

impl Classifier for MultinomialNaiveBayes {
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError> {
        Ok(features
            .iter()
            .map(|row| {
                self.log_likelihoods(row)
                    .into_iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (code, score)| {
                        if score > best.1 {
                            (code, score)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_counts() {
        // sports: goal x3, match x1; politics: vote x2, goal x0
        let features = vec![
            vec![2.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 2.0],
        ];

        let model = MultinomialNaiveBayes::fit(&features, &[1, 1, 0], 2, ALPHA).unwrap();

        // politics: (0 + 1) / (2 + 3) for goal
        assert!((model.feature_log_probs[0][0] - (1.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!((model.class_log_priors[1] - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert_eq!(
            model.predict(&vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap(),
            [1, 0]
        );
    }

    #[test]
    fn test_fractional_weights() {
        let features = vec![
            vec![0.8, 0.6, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.7, 0.0, 0.714],
        ];

        let model = MultinomialNaiveBayes::fit(&features, &[0, 1, 1], 2, ALPHA).unwrap();

        assert_eq!(
            model.predict(&vec![vec![0.0, 2.0, 0.0], vec![0.0, 0.0, 0.5]]).unwrap(),
            [0, 1]
        );
    }

    #[test]
    fn test_empty_row_takes_the_larger_prior() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 2.0]];

        let model = MultinomialNaiveBayes::fit(&features, &[0, 1, 1], 2, ALPHA).unwrap();

        assert_eq!(model.predict(&vec![vec![0.0, 0.0]]).unwrap(), [1]);
    }

    #[test]
    fn test_label_out_of_range_fails() {
        let result = MultinomialNaiveBayes::fit(&vec![vec![1.0]], &[3], 2, ALPHA);

        assert!(matches!(result, Err(ModelError::UnknownClass(3))));
    }
}
