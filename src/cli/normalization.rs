use std::{fmt::Display, str::FromStr};

use crate::preprocessing::Normalization;

/// The unique string token for stemming
pub static STEMMING: &str = "stemming";

/// The unique string token for lemmatization
pub static LEMMATIZING: &str = "lemmatizing";

impl TryFrom<&str> for Normalization {
    type Error = NormalizationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            v if v == STEMMING || v == "stem" => Ok(Normalization::Stemming),
            v if v == LEMMATIZING || v == "lemmatize" => Ok(Normalization::Lemmatizing),
            _ => Err(NormalizationError::Unknown(value.to_string())),
        }
    }
}

impl FromStr for Normalization {
    type Err = NormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Normalization::Stemming => STEMMING,
            Normalization::Lemmatizing => LEMMATIZING,
        };

        write!(f, "{}", name)
    }
}

/// Normalization Error
#[derive(thiserror::Error, Debug)]
pub enum NormalizationError {
    /// No normalization found for the given string
    #[error("no normalization found for {0}; expected stemming or lemmatizing")]
    Unknown(String),
}
