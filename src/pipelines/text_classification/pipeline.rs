use super::{
    model::{ModelError, TrainedModel},
    vectorizer::Vectorizer,
};

/// A fitted vectorizer followed by a fitted classifier
pub struct TrainedPipeline {
    /// Vocabulary and weighting learned from the training split
    vectorizer: Vectorizer,

    /// The fitted classifier
    model: TrainedModel,
}

impl TrainedPipeline {
    /// Pair a fitted vectorizer with the classifier trained on its output
    pub fn new(vectorizer: Vectorizer, model: TrainedModel) -> Self {
        Self { vectorizer, model }
    }

    /// The fitted vectorizer
    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Predict a class code for each joined-token document
    pub fn predict<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<usize>, ModelError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        self.model.predict(&self.vectorizer.transform(documents))
    }

    /// Fraction of documents predicted as their given class
    pub fn score<S: AsRef<str>>(
        &self,
        documents: &[S],
        targets: &[usize],
    ) -> Result<f64, ModelError> {
        let predicted = self.predict(documents)?;

        if predicted.is_empty() {
            return Ok(0.0);
        }

        let correct = predicted
            .iter()
            .zip(targets)
            .filter(|(guess, target)| guess == target)
            .count();

        Ok(correct as f64 / predicted.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::text_classification::{ClassifierKind, Problem, VectorizerKind};

    const DOCUMENTS: [&str; 4] = [
        "goal match striker",
        "goal goal match",
        "election vote minist",
        "vote parliament election",
    ];

    #[test]
    fn test_predict_and_score() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Count, &DOCUMENTS).unwrap();
        let problem = Problem::new(
            ClassifierKind::MultinomialNaiveBayes,
            vectorizer.transform(&DOCUMENTS),
            &[1, 1, 0, 0],
            2,
            0,
        )
        .unwrap();
        let pipeline = TrainedPipeline::new(vectorizer, problem.fit().unwrap());

        assert_eq!(pipeline.vectorizer().n_features(), 7);
        assert_eq!(
            pipeline.predict(&["striker goal", "parliament vote"]).unwrap(),
            [1, 0]
        );
        assert_eq!(
            pipeline.score(&["striker goal", "parliament vote"], &[1, 1]).unwrap(),
            0.5
        );
    }

    #[test]
    fn test_empty_input_predicts_nothing() {
        let vectorizer = Vectorizer::fit(VectorizerKind::Tfidf, &DOCUMENTS).unwrap();
        let problem = Problem::new(
            ClassifierKind::BernoulliNaiveBayes,
            vectorizer.transform(&DOCUMENTS),
            &[1, 1, 0, 0],
            2,
            0,
        )
        .unwrap();
        let pipeline = TrainedPipeline::new(vectorizer, problem.fit().unwrap());
        let empty: [&str; 0] = [];

        assert!(pipeline.predict(&empty).unwrap().is_empty());
        assert_eq!(pipeline.score(&empty, &[]).unwrap(), 0.0);
    }
}
