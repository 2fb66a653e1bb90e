use std::{
    collections::{BTreeSet, HashMap},
    hash::Hash,
};

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Ord + Hash + Eq,
    V: Ord + Hash + Eq + Clone,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// Builds a [`FittedEncoder`] from the class labels of the training split
pub struct LabelEncoder;

impl LabelEncoder {
    /// Assign a dense code to each distinct label, in sorted label order
    pub fn fit<I, S>(labels: I) -> Result<FittedEncoder, ClassesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        if classes.is_empty() {
            return Err(ClassesError::EmptyLabels);
        }

        let label2id: HashMap<String, usize> =
            invert_map(classes.iter().cloned().enumerate());

        Ok(FittedEncoder {
            id2label: classes,
            label2id,
        })
    }
}

/// A read-only mapping between class labels and their dense integer codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedEncoder {
    /// Class labels indexed by code
    id2label: Vec<String>,

    /// A mapping from class labels to codes
    label2id: HashMap<String, usize>,
}

impl FittedEncoder {
    /// Look up the code for a label seen during fit
    pub fn transform(&self, label: &str) -> Result<usize, ClassesError> {
        self.label2id
            .get(label)
            .copied()
            .ok_or_else(|| ClassesError::UnknownLabel(label.to_string()))
    }

    /// Look up the label for a code
    pub fn inverse(&self, code: usize) -> Result<&str, ClassesError> {
        self.id2label
            .get(code)
            .map(String::as_str)
            .ok_or(ClassesError::UnknownCode(code))
    }

    /// Class labels in code order
    pub fn classes(&self) -> &[String] {
        &self.id2label
    }

    /// The number of classes
    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    /// Always false for an encoder produced by [`LabelEncoder::fit`]
    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }
}

/// Label encoding errors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ClassesError {
    /// Fit was given no labels at all
    #[error("cannot fit a label encoder without any labels")]
    EmptyLabels,

    /// A label that was not present in the training split
    #[error("label {0:?} was not seen in the training split")]
    UnknownLabel(String),

    /// A code outside of `0..K`
    #[error("no class label for code {0}")]
    UnknownCode(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_codes_are_dense_and_sorted() {
        let encoder = LabelEncoder::fit(["sports", "politics", "sports", "arts"]).unwrap();

        assert_eq!(encoder.classes(), ["arts", "politics", "sports"]);
        assert_eq!(encoder.transform("arts"), Ok(0));
        assert_eq!(encoder.transform("politics"), Ok(1));
        assert_eq!(encoder.transform("sports"), Ok(2));
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn test_inverse_round_trips() {
        let labels = ["sports", "politics", "weather"];
        let encoder = LabelEncoder::fit(labels).unwrap();

        for label in labels {
            let code = encoder.transform(label).unwrap();
            assert_eq!(encoder.inverse(code), Ok(label));
        }
    }

    #[test]
    fn test_unknown_label_and_code() {
        let encoder = LabelEncoder::fit(["sports"]).unwrap();

        assert_eq!(
            encoder.transform("politics"),
            Err(ClassesError::UnknownLabel("politics".to_string()))
        );
        assert_eq!(encoder.inverse(1), Err(ClassesError::UnknownCode(1)));
    }

    #[test]
    fn test_empty_fit_fails() {
        let labels: Vec<String> = Vec::new();

        assert_eq!(LabelEncoder::fit(labels), Err(ClassesError::EmptyLabels));
    }
}
