use serde::{Deserialize, Serialize};
use smartcore::{
    ensemble::random_forest_classifier::{
        RandomForestClassifier, RandomForestClassifierParameters,
    },
    linalg::basic::matrix::DenseMatrix,
    metrics::distance::euclidian::Euclidian,
    naive_bayes::bernoulli::{BernoulliNB, BernoulliNBParameters},
    neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters},
};

use super::{
    naive_bayes::{self, MultinomialNaiveBayes},
    svm::{Svm, SvmParameters},
    vectorizer::Features,
};

/// Neighbors consulted by the k-NN classifier
pub const KNN_NEIGHBORS: usize = 5;

/// The classifiers that can be placed after the vectorizer
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ClassifierKind {
    /// Multinomial Naive Bayes over term counts or TF-IDF weights
    #[serde(rename = "multinomial-nb")]
    MultinomialNaiveBayes,

    /// Bernoulli Naive Bayes over term presence
    #[serde(rename = "bernoulli-nb")]
    BernoulliNaiveBayes,

    /// A random forest of decision trees
    #[serde(rename = "random-forest")]
    RandomForest,

    /// k-nearest-neighbors by euclidean distance
    #[serde(rename = "knn")]
    KNearestNeighbors,

    /// RBF-kernel support vector machine, one-vs-one for more than two classes
    #[default]
    #[serde(rename = "svm")]
    Svm,
}

/// A fitted classifier
pub trait Classifier {
    /// Predict a class code for each row
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError>;
}

/// The fitted classifier for a [`Problem`]
pub type TrainedModel = Box<dyn Classifier>;

type Labels = Vec<u32>;
type Matrix = DenseMatrix<f64>;

/// The training matrix and labels for one classifier, fitted with [`Problem::fit`]
pub struct Problem {
    kind: ClassifierKind,
    n_classes: usize,
    features: Features,
    labels: Vec<usize>,
    seed: u64,
}

impl Problem {
    /// Build a problem from vectorized training rows and their class codes `0..n_classes`
    pub fn new(
        kind: ClassifierKind,
        features: Features,
        labels: &[usize],
        n_classes: usize,
        seed: u64,
    ) -> Result<Self, ModelError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(ModelError::Shape {
                rows: features.len(),
                labels: labels.len(),
            });
        }

        if let Some(&label) = labels.iter().find(|&&label| label >= n_classes) {
            return Err(ModelError::UnknownClass(label));
        }

        Ok(Self {
            kind,
            n_classes,
            features,
            labels: labels.to_vec(),
            seed,
        })
    }

    /// The classifier this problem fits
    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    /// Fit the classifier
    pub fn fit(&self) -> Result<TrainedModel, ModelError> {
        info!(
            "Fitting {:?} on {} documents x {} features",
            self.kind,
            self.features.len(),
            self.features.first().map_or(0, Vec::len)
        );

        let model: TrainedModel = match self.kind {
            ClassifierKind::MultinomialNaiveBayes => Box::new(MultinomialNaiveBayes::fit(
                &self.features,
                &self.labels,
                self.n_classes,
                naive_bayes::ALPHA,
            )?),
            ClassifierKind::BernoulliNaiveBayes => {
                let model = BernoulliNB::fit(
                    &matrix(&self.features)?,
                    &self.backend_labels(),
                    BernoulliNBParameters::default(),
                )
                .map_err(fit_error)?;

                Box::new(Bernoulli(model))
            }
            ClassifierKind::RandomForest => {
                let model = RandomForestClassifier::fit(
                    &matrix(&self.features)?,
                    &self.backend_labels(),
                    RandomForestClassifierParameters::default().with_seed(self.seed),
                )
                .map_err(fit_error)?;

                Box::new(Forest(model))
            }
            ClassifierKind::KNearestNeighbors => {
                // The backend needs 1 < k <= samples
                let k = KNN_NEIGHBORS.min(self.labels.len());
                if k < 2 {
                    return Err(ModelError::TooFewSamples(self.labels.len()));
                }

                let model = KNNClassifier::fit(
                    &matrix(&self.features)?,
                    &self.backend_labels(),
                    KNNClassifierParameters::default().with_k(k),
                )
                .map_err(fit_error)?;

                Box::new(Neighbors(model))
            }
            ClassifierKind::Svm => Box::new(Svm::fit(
                &self.features,
                &self.labels,
                self.n_classes,
                SvmParameters::scaled(&self.features).with_seed(self.seed),
            )?),
        };

        debug!("Fitted {:?} for {} classes", self.kind, self.n_classes);

        Ok(model)
    }

    fn backend_labels(&self) -> Labels {
        self.labels.iter().map(|&label| label as u32).collect()
    }
}

struct Bernoulli(BernoulliNB<f64, u32, Matrix, Labels>);

impl Classifier for Bernoulli {
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError> {
        let predicted = self.0.predict(&matrix(features)?).map_err(predict_error)?;

        Ok(to_codes(predicted))
    }
}

struct Forest(RandomForestClassifier<f64, u32, Matrix, Labels>);

impl Classifier for Forest {
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError> {
        let predicted = self.0.predict(&matrix(features)?).map_err(predict_error)?;

        Ok(to_codes(predicted))
    }
}

struct Neighbors(KNNClassifier<f64, u32, Matrix, Labels, Euclidian<f64>>);

impl Classifier for Neighbors {
    fn predict(&self, features: &Features) -> Result<Vec<usize>, ModelError> {
        let predicted = self.0.predict(&matrix(features)?).map_err(predict_error)?;

        Ok(to_codes(predicted))
    }
}

fn matrix(features: &Features) -> Result<Matrix, ModelError> {
    DenseMatrix::from_2d_vec(features).map_err(|e| ModelError::Matrix(e.to_string()))
}

fn to_codes(predicted: Labels) -> Vec<usize> {
    predicted.into_iter().map(|code| code as usize).collect()
}

fn fit_error(e: smartcore::error::Failed) -> ModelError {
    ModelError::Fit(e.to_string())
}

fn predict_error(e: smartcore::error::Failed) -> ModelError {
    ModelError::Predict(e.to_string())
}

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// The training rows and labels don't line up, or there are no rows
    #[error("{rows} feature rows for {labels} labels")]
    Shape {
        /// Number of feature rows
        rows: usize,

        /// Number of labels
        labels: usize,
    },

    /// A label is outside `0..n_classes`
    #[error("class code {0} is out of range")]
    UnknownClass(usize),

    /// The classifier needs more training documents
    #[error("not enough training documents ({0}) for this classifier")]
    TooFewSamples(usize),

    /// The feature rows could not be turned into a matrix
    #[error("invalid feature matrix: {0}")]
    Matrix(String),

    /// The backend failed to fit
    #[error("fit failed: {0}")]
    Fit(String),

    /// The backend failed to predict
    #[error("predict failed: {0}")]
    Predict(String),
}
