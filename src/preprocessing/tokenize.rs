use std::fmt::Debug;

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use super::{clean, lemmatizer::Lemmatizer, stopwords};

lazy_static! {
    /// Runs of word characters, or runs of anything that is neither word nor whitespace
    static ref WORD_PUNCT: Regex = Regex::new(r"\w+|[^\w\s]+").expect("valid regex");
}

/// Tokens of this many characters or fewer are dropped
pub const MAX_SHORT_TOKEN_LEN: usize = 2;

/// How surviving tokens are normalized
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Reduce each token to a heuristic root with the English Snowball stemmer
    #[default]
    Stemming,

    /// Strip plural endings with suffix rules and a small exception table
    Lemmatizing,
}

enum Normalizer {
    Stemmer(Stemmer),
    Lemmatizer(Lemmatizer),
}

/// Splits cleaned text into normalized word tokens
pub struct Tokenizer {
    normalization: Normalization,
    normalizer: Normalizer,
}

impl Tokenizer {
    /// Creates a tokenizer with one normalization mode for its whole lifetime
    pub fn new(normalization: Normalization) -> Self {
        let normalizer = match normalization {
            Normalization::Stemming => Normalizer::Stemmer(Stemmer::create(Algorithm::English)),
            Normalization::Lemmatizing => Normalizer::Lemmatizer(Lemmatizer::new()),
        };

        Self {
            normalization,
            normalizer,
        }
    }

    /// The active normalization mode
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Tokenize a cleaned document, dropping stopwords and short tokens
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        WORD_PUNCT
            .find_iter(document)
            .map(|m| m.as_str())
            .filter(|token| {
                !stopwords::is_stopword(token) && token.chars().count() > MAX_SHORT_TOKEN_LEN
            })
            .map(|token| self.normalize(token))
            .collect()
    }

    /// Clean then tokenize a raw document
    pub fn process(&self, document: &str) -> Vec<String> {
        self.tokenize(&clean(document))
    }

    /// Join tokens into the single-space separated form the vectorizers consume
    pub fn join(tokens: &[String]) -> String {
        tokens.join(" ")
    }

    fn normalize(&self, token: &str) -> String {
        match &self.normalizer {
            Normalizer::Stemmer(stemmer) => stemmer.stem(token).into_owned(),
            Normalizer::Lemmatizer(lemmatizer) => lemmatizer.lemmatize(token),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Normalization::default())
    }
}

impl Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("normalization", &self.normalization)
            .finish()
    }
}
