use derive_new::new;
use rand::{seq::SliceRandom, Rng};

use crate::{
    datasets::Split,
    preprocessing::Tokenizer,
    utils::classes::{ClassesError, FittedEncoder},
};

use super::Item;

/// A whole split, preprocessed and encoded for the vectorizer
#[derive(Clone, Debug, PartialEq, new)]
pub struct Batch {
    /// The split the documents came from
    pub split: Split,

    /// Document names, for reporting
    pub names: Vec<String>,

    /// Normalized tokens joined by single spaces, one string per document
    pub inputs: Vec<String>,

    /// Class codes
    pub targets: Vec<usize>,
}

impl Batch {
    /// Returns the number of documents
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// True if the batch has no documents
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Shuffle documents in place, keeping names, inputs and targets aligned
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);

        self.names = order.iter().map(|&i| self.names[i].clone()).collect();
        self.inputs = order.iter().map(|&i| self.inputs[i].clone()).collect();
        self.targets = order.iter().map(|&i| self.targets[i]).collect();
    }
}

/// Turns labeled items into a [`Batch`] with a shared tokenizer and a fitted label encoder
#[derive(new)]
pub struct Batcher<'a> {
    /// Tokenizer with the configured normalization
    tokenizer: &'a Tokenizer,

    /// Encoder fitted on the training split
    encoder: &'a FittedEncoder,
}

impl Batcher<'_> {
    /// Clean, tokenize and encode every item; fails on a label the encoder never saw
    pub fn batch<I: Item>(&self, split: Split, items: &[I]) -> Result<Batch, ClassesError> {
        let mut names = Vec::with_capacity(items.len());
        let mut inputs = Vec::with_capacity(items.len());
        let mut targets = Vec::with_capacity(items.len());

        for item in items {
            targets.push(self.encoder.transform(item.class_label())?);

            let tokens = self.tokenizer.process(item.input());
            inputs.push(Tokenizer::join(&tokens));
            names.push(item.name().to_string());
        }

        debug!("Prepared {} documents for the {} split", inputs.len(), split);

        Ok(Batch::new(split, names, inputs, targets))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{datasets::Document, utils::classes::LabelEncoder};

    fn document(name: &str, text: &str, class_label: &str) -> Document {
        Document::new(
            PathBuf::from(name),
            name.to_string(),
            text.to_string(),
            class_label.to_string(),
        )
    }

    fn documents() -> Vec<Document> {
        vec![
            document("s1.txt", "The striker scored two goals!", "sports"),
            document("p1.txt", "Voters elected a new parliament.", "politics"),
            document("s2.txt", "It is in the", "sports"),
        ]
    }

    #[test]
    fn test_batch_encodes_and_tokenizes() {
        let documents = documents();
        let encoder = LabelEncoder::fit(documents.iter().map(|d| d.class_label.as_str())).unwrap();
        let tokenizer = Tokenizer::default();

        let batch = Batcher::new(&tokenizer, &encoder)
            .batch(Split::Train, &documents)
            .unwrap();

        assert_eq!(batch.names, ["s1.txt", "p1.txt", "s2.txt"]);
        assert_eq!(batch.targets, [1, 0, 1]);
        assert_eq!(batch.inputs[0], "striker score two goal");
        assert_eq!(batch.inputs[2], "");
    }

    #[test]
    fn test_unknown_label_fails() {
        let encoder = LabelEncoder::fit(["sports"]).unwrap();
        let tokenizer = Tokenizer::default();

        let result = Batcher::new(&tokenizer, &encoder).batch(Split::Test, &documents());

        assert_eq!(
            result.unwrap_err(),
            ClassesError::UnknownLabel("politics".to_string())
        );
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible_and_aligned() {
        let documents = documents();
        let encoder = LabelEncoder::fit(documents.iter().map(|d| d.class_label.as_str())).unwrap();
        let tokenizer = Tokenizer::default();
        let batch = Batcher::new(&tokenizer, &encoder)
            .batch(Split::Train, &documents)
            .unwrap();

        let mut first = batch.clone();
        first.shuffle(&mut StdRng::seed_from_u64(7));
        let mut second = batch.clone();
        second.shuffle(&mut StdRng::seed_from_u64(7));

        assert_eq!(first, second);

        for (i, name) in first.names.iter().enumerate() {
            let original = batch.names.iter().position(|n| n == name).unwrap();
            assert_eq!(first.inputs[i], batch.inputs[original]);
            assert_eq!(first.targets[i], batch.targets[original]);
        }
    }
}
