/// Regex-based text cleaning
pub mod clean;

/// English stopwords
pub mod stopwords;

/// Rule-based lemmatization
pub mod lemmatizer;

/// Word tokenization and normalization
pub mod tokenize;

pub use clean::clean;
pub use lemmatizer::Lemmatizer;
pub use tokenize::{Normalization, Tokenizer};
