use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Terms of two or more word characters
    static ref TERM: Regex = Regex::new(r"\b\w\w+\b").expect("valid regex");
}

/// Dense document-term rows, one per document
pub type Features = Vec<Vec<f64>>;

/// The bag-of-words encodings
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum VectorizerKind {
    /// Raw term counts
    #[default]
    #[serde(rename = "count")]
    Count,

    /// Term counts weighted by smoothed inverse document frequency, L2-normalized per document
    #[serde(rename = "tfidf")]
    Tfidf,
}

/// A vectorizer fitted on the training documents
#[derive(Debug, Clone)]
pub struct Vectorizer {
    kind: VectorizerKind,

    /// A mapping from terms to column indexes, assigned in sorted term order
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column, TF-IDF only
    idf: Option<Vec<f64>>,
}

impl Vectorizer {
    /// Learn the vocabulary (and document frequencies for TF-IDF) from the training documents
    pub fn fit<S: AsRef<str>>(
        kind: VectorizerKind,
        documents: &[S],
    ) -> Result<Self, VectorizerError> {
        let terms: BTreeSet<String> = documents
            .iter()
            .flat_map(|document| analyze(document.as_ref()))
            .collect();

        if terms.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        let idf = match kind {
            VectorizerKind::Count => None,
            VectorizerKind::Tfidf => Some(inverse_document_frequency(&vocabulary, documents)),
        };

        debug!("Fitted {:?} vectorizer with {} terms", kind, vocabulary.len());

        Ok(Self {
            kind,
            vocabulary,
            idf,
        })
    }

    /// Encode documents as dense rows. Terms not seen during fit are ignored.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Features {
        documents
            .iter()
            .map(|document| {
                let mut row = self.counts(document.as_ref());

                if let Some(idf) = &self.idf {
                    for (value, weight) in row.iter_mut().zip(idf) {
                        *value *= weight;
                    }

                    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                    if norm > 0.0 {
                        row.iter_mut().for_each(|v| *v /= norm);
                    }
                }

                row
            })
            .collect()
    }

    /// The encoding this vectorizer produces
    pub fn kind(&self) -> VectorizerKind {
        self.kind
    }

    /// A mapping from terms to column indexes
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// The number of columns in each row
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn counts(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];

        for term in analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        row
    }
}

/// Split a document into lowercase terms
fn analyze(document: &str) -> impl Iterator<Item = String> + '_ {
    TERM.find_iter(document).map(|m| m.as_str().to_lowercase())
}

/// Smoothed idf: `ln((1 + n) / (1 + df)) + 1`
fn inverse_document_frequency<S: AsRef<str>>(
    vocabulary: &HashMap<String, usize>,
    documents: &[S],
) -> Vec<f64> {
    let mut document_frequency = vec![0usize; vocabulary.len()];

    for document in documents {
        let seen: BTreeSet<usize> = analyze(document.as_ref())
            .filter_map(|term| vocabulary.get(&term).copied())
            .collect();

        for index in seen {
            document_frequency[index] += 1;
        }
    }

    let n = documents.len() as f64;

    document_frequency
        .into_iter()
        .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect()
}

/// Vectorizer Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum VectorizerError {
    /// No document in the training split produced a single term
    #[error("empty vocabulary; the training documents may contain only stopwords")]
    EmptyVocabulary,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DOCUMENTS: [&str; 3] = ["goal match goal", "elect vote", "match vote"];

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Count, &DOCUMENTS).unwrap();

        let mut terms: Vec<_> = vectorizer.vocabulary().iter().collect();
        terms.sort_by_key(|(_, index)| **index);
        let terms: Vec<_> = terms.into_iter().map(|(term, _)| term.as_str()).collect();

        assert_eq!(terms, ["elect", "goal", "match", "vote"]);
        assert_eq!(vectorizer.n_features(), 4);
    }

    #[test]
    fn test_counts() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Count, &DOCUMENTS).unwrap();

        let rows = vectorizer.transform(&["goal goal vote unseen", ""]);

        assert_eq!(rows[0], [0.0, 2.0, 0.0, 1.0]);
        assert_eq!(rows[1], [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tfidf_rows_are_unit_length() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Tfidf, &DOCUMENTS).unwrap();

        let rows = vectorizer.transform(&DOCUMENTS);

        for row in &rows {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }

        // "goal" appears in one document and "match" in two, so goal outweighs match
        assert!(rows[0][1] > rows[0][2]);
    }

    #[test]
    fn test_tfidf_empty_document_stays_zero() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Tfidf, &DOCUMENTS).unwrap();

        let rows = vectorizer.transform(&[""]);

        assert!(rows[0].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_single_character_terms_are_ignored() {
        let result = Vectorizer::fit(VectorizerKind::Count, &["", "a b"]);

        assert_eq!(result.unwrap_err(), VectorizerError::EmptyVocabulary);
    }
}
