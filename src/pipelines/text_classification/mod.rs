/// Run configuration
pub mod config;

/// Preprocessing and label encoding of whole splits
pub mod batcher;

/// Text Classification Items
pub mod item;

/// Count and TF-IDF vectorizers
pub mod vectorizer;

/// Classifiers and their training problems
pub mod model;

/// Multinomial Naive Bayes over real-valued term weights
pub mod naive_bayes;

/// One-vs-one RBF support vector machines
pub mod svm;

/// The fitted vectorizer + classifier pair
pub mod pipeline;

/// Training
pub mod training;

/// Accuracy and per-class reports
pub mod evaluation;

pub use batcher::{Batch, Batcher};
pub use config::{Config, ConfigError};
pub use evaluation::{evaluate, Report};
pub use item::Item;
pub use model::{Classifier, ClassifierKind, Problem};
pub use pipeline::TrainedPipeline;
pub use training::train;
pub use vectorizer::{Vectorizer, VectorizerKind};
