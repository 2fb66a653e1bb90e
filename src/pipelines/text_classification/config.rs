use std::{
    fs,
    path::{Path, PathBuf},
};

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::preprocessing::Normalization;

use super::{model::ClassifierKind, vectorizer::VectorizerKind};

/// Everything a training run needs to know, fixed before the run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Config {
    /// Root of the training split, laid out as `<class>/<document>.txt`
    pub train_data: PathBuf,

    /// Root of the validation split
    #[new(default)]
    #[serde(default)]
    pub val_data: Option<PathBuf>,

    /// Root of the test split
    #[new(default)]
    #[serde(default)]
    pub test_data: Option<PathBuf>,

    /// Token normalization
    #[new(default)]
    #[serde(default)]
    pub normalization: Normalization,

    /// Bag-of-words encoding
    #[new(default)]
    #[serde(default)]
    pub vectorizer: VectorizerKind,

    /// The classifier after the vectorizer
    #[new(default)]
    #[serde(default)]
    pub classifier: ClassifierKind,

    /// Seed for the training shuffle and the random forest; drawn from entropy when absent
    #[new(default)]
    #[serde(default)]
    pub seed: Option<u64>,

    /// Print the per-class table under each accuracy line
    #[new(value = "true")]
    #[serde(default = "default_report")]
    pub report: bool,

    /// Directory for `<split>.csv` prediction files
    #[new(default)]
    #[serde(default)]
    pub predictions_dir: Option<PathBuf>,
}

fn default_report() -> bool {
    true
}

impl Config {
    /// Load a configuration from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let config: Self = match extension.as_str() {
            "json" => serde_json::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Set the validation split
    pub fn with_val_data(mut self, val_data: Option<PathBuf>) -> Self {
        self.val_data = val_data;
        self
    }

    /// Set the test split
    pub fn with_test_data(mut self, test_data: Option<PathBuf>) -> Self {
        self.test_data = test_data;
        self
    }

    /// Set the token normalization
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the vectorizer
    pub fn with_vectorizer(mut self, vectorizer: VectorizerKind) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Set the classifier
    pub fn with_classifier(mut self, classifier: ClassifierKind) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Show or hide the per-class tables
    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    /// Set the predictions directory
    pub fn with_predictions_dir(mut self, predictions_dir: Option<PathBuf>) -> Self {
        self.predictions_dir = predictions_dir;
        self
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The JSON config could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The YAML config could not be parsed
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not a known config format
    #[error("unsupported config format for {0}; use .json, .yaml or .yml")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("data/train"));

        assert_eq!(config.val_data, None);
        assert_eq!(config.normalization, Normalization::Stemming);
        assert_eq!(config.vectorizer, VectorizerKind::Count);
        assert_eq!(config.classifier, ClassifierKind::Svm);
        assert!(config.report);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "train_data: data/train\ntest_data: data/test\nvectorizer: tfidf\nclassifier: bernoulli-nb\nnormalization: lemmatizing\nseed: 3\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(
            config,
            Config::new(PathBuf::from("data/train"))
                .with_test_data(Some(PathBuf::from("data/test")))
                .with_vectorizer(VectorizerKind::Tfidf)
                .with_classifier(ClassifierKind::BernoulliNaiveBayes)
                .with_normalization(Normalization::Lemmatizing)
                .with_seed(Some(3))
        );
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"train_data": "train", "classifier": "random-forest", "report": false}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.classifier, ClassifierKind::RandomForest);
        assert!(!config.report);
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "train_data = 'train'").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_tfidf_with_multinomial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "train_data: train\nvectorizer: tfidf\nclassifier: multinomial-nb\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.vectorizer, VectorizerKind::Tfidf);
        assert_eq!(config.classifier, ClassifierKind::MultinomialNaiveBayes);
    }
}
