use std::{fmt::Display, str::FromStr};

use crate::pipelines::text_classification::ClassifierKind;

/// Every classifier with its unique string token
pub static CLASSIFIERS: &[(ClassifierKind, &str)] = &[
    (ClassifierKind::MultinomialNaiveBayes, "multinomial-nb"),
    (ClassifierKind::BernoulliNaiveBayes, "bernoulli-nb"),
    (ClassifierKind::RandomForest, "random-forest"),
    (ClassifierKind::KNearestNeighbors, "knn"),
    (ClassifierKind::Svm, "svm"),
];

impl TryFrom<&str> for ClassifierKind {
    type Error = ClassifierKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lowered = value.to_lowercase();

        CLASSIFIERS
            .iter()
            .find(|(_, name)| *name == lowered)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| ClassifierKindError::Unknown(value.to_string()))
    }
}

impl FromStr for ClassifierKind {
    type Err = ClassifierKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = CLASSIFIERS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default();

        write!(f, "{}", name)
    }
}

/// Classifier Kind Error
#[derive(thiserror::Error, Debug)]
pub enum ClassifierKindError {
    /// No classifier found for the given string
    #[error("no classifier found for {0}")]
    Unknown(String),
}
