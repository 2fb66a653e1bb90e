use std::{fmt::Display, str::FromStr};

use crate::pipelines::text_classification::VectorizerKind;

/// The unique string token for raw term counts
pub static COUNT: &str = "count";

/// The unique string token for TF-IDF
pub static TFIDF: &str = "tfidf";

impl TryFrom<&str> for VectorizerKind {
    type Error = VectorizerKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            v if v == COUNT => Ok(VectorizerKind::Count),
            v if v == TFIDF || v == "tf-idf" => Ok(VectorizerKind::Tfidf),
            _ => Err(VectorizerKindError::Unknown(value.to_string())),
        }
    }
}

impl FromStr for VectorizerKind {
    type Err = VectorizerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for VectorizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VectorizerKind::Count => COUNT,
            VectorizerKind::Tfidf => TFIDF,
        };

        write!(f, "{}", name)
    }
}

/// Vectorizer Kind Error
#[derive(thiserror::Error, Debug)]
pub enum VectorizerKindError {
    /// No vectorizer found for the given string
    #[error("no vectorizer found for {0}; expected count or tfidf")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in [VectorizerKind::Count, VectorizerKind::Tfidf] {
            assert_eq!(kind.to_string().parse::<VectorizerKind>().unwrap(), kind);
        }

        assert_eq!("TF-IDF".parse::<VectorizerKind>().unwrap(), VectorizerKind::Tfidf);
        assert!("word2vec".parse::<VectorizerKind>().is_err());
    }
}
