use std::{fmt::Display, fs, path::Path};

use serde::Serialize;

use crate::{datasets::Split, utils::classes::FittedEncoder};

use super::{Batch, TrainedPipeline};

/// Precision, recall and F1 for one class or one average
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// Class label, or the name of the average
    pub label: String,

    /// Correct predictions of this class over all predictions of it
    pub precision: f64,

    /// Correct predictions of this class over all documents of it
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1: f64,

    /// Documents of this class
    pub support: usize,
}

/// Accuracy and a per-class report for one split
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// The evaluated split
    pub split: Split,

    /// Fraction of documents whose predicted class is the true class
    pub accuracy: f64,

    /// One row per training class, in code order
    pub classes: Vec<ClassMetrics>,

    /// Unweighted mean over classes
    pub macro_avg: ClassMetrics,

    /// Support-weighted mean over classes
    pub weighted_avg: ClassMetrics,

    /// The predicted class code of each document
    pub predicted: Vec<usize>,

    /// Whether Display includes the per-class table
    pub show_table: bool,
}

impl Report {
    /// Build a report from true and predicted codes over every class the encoder knows
    pub fn new(
        split: Split,
        encoder: &FittedEncoder,
        targets: &[usize],
        predicted: Vec<usize>,
    ) -> Self {
        let n_classes = encoder.len();
        let mut true_positive = vec![0usize; n_classes];
        let mut predicted_count = vec![0usize; n_classes];
        let mut support = vec![0usize; n_classes];

        for (&target, &guess) in targets.iter().zip(&predicted) {
            support[target] += 1;
            predicted_count[guess] += 1;
            if target == guess {
                true_positive[target] += 1;
            }
        }

        let total = targets.len();
        let correct: usize = true_positive.iter().sum();
        let accuracy = ratio(correct, total);

        let classes: Vec<ClassMetrics> = encoder
            .classes()
            .iter()
            .enumerate()
            .map(|(code, label)| {
                let precision = ratio(true_positive[code], predicted_count[code]);
                let recall = ratio(true_positive[code], support[code]);

                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support: support[code],
                }
            })
            .collect();

        let macro_avg = average("macro avg", &classes, |_| 1.0 / n_classes as f64, total);
        let weighted_avg = average(
            "weighted avg",
            &classes,
            |metrics| ratio(metrics.support, total),
            total,
        );

        Self {
            split,
            accuracy,
            classes,
            macro_avg,
            weighted_avg,
            predicted,
            show_table: true,
        }
    }

    /// Hide or show the per-class table when displayed
    pub fn with_table(mut self, show_table: bool) -> Self {
        self.show_table = show_table;
        self
    }

    /// Number of evaluated documents
    pub fn support(&self) -> usize {
        self.predicted.len()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:6} accuracy: {:?}", format!("{}:", self.split), self.accuracy)?;

        if !self.show_table {
            return Ok(());
        }

        let width = self
            .classes
            .iter()
            .map(|metrics| metrics.label.chars().count())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or_default();

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for metrics in &self.classes {
            write_row(f, metrics, width)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        write_row(f, &self.macro_avg, width)?;
        write_row(f, &self.weighted_avg, width)
    }
}

fn write_row(
    f: &mut std::fmt::Formatter<'_>,
    metrics: &ClassMetrics,
    width: usize,
) -> std::fmt::Result {
    writeln!(
        f,
        "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
        metrics.label, metrics.precision, metrics.recall, metrics.f1, metrics.support
    )
}

/// Score a split with the trained pipeline; absent splits produce no report
pub fn evaluate(
    pipeline: &TrainedPipeline,
    encoder: &FittedEncoder,
    batch: Option<&Batch>,
) -> anyhow::Result<Option<Report>> {
    let Some(batch) = batch else {
        return Ok(None);
    };

    let predicted = pipeline.predict(&batch.inputs)?;
    let report = Report::new(batch.split, encoder, &batch.targets, predicted);

    info!(
        "Evaluated {} documents of the {} split: accuracy {:.4}",
        batch.len(),
        batch.split,
        report.accuracy
    );

    Ok(Some(report))
}

#[derive(Serialize)]
struct PredictionRow<'a> {
    document: &'a str,
    class: &'a str,
    predicted: &'a str,
}

/// Write `<dir>/<split>.csv` with the true and predicted class of each document
pub fn write_predictions(
    dir: &Path,
    batch: &Batch,
    report: &Report,
    encoder: &FittedEncoder,
) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}.csv", batch.split));
    let mut writer = csv::Writer::from_path(&path)?;

    for ((name, &target), &guess) in batch.names.iter().zip(&batch.targets).zip(&report.predicted) {
        writer.serialize(PredictionRow {
            document: name,
            class: encoder.inverse(target)?,
            predicted: encoder.inverse(guess)?,
        })?;
    }

    writer.flush()?;
    debug!("Wrote predictions to {}", path.display());

    Ok(())
}

/// `numerator / denominator`, or 0 when there is nothing to divide by
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn average<W: Fn(&ClassMetrics) -> f64>(
    label: &str,
    classes: &[ClassMetrics],
    weight: W,
    support: usize,
) -> ClassMetrics {
    let (precision, recall, f1) = classes.iter().fold((0.0, 0.0, 0.0), |acc, metrics| {
        let w = weight(metrics);
        (
            acc.0 + w * metrics.precision,
            acc.1 + w * metrics.recall,
            acc.2 + w * metrics.f1,
        )
    });

    ClassMetrics {
        label: label.to_string(),
        precision,
        recall,
        f1,
        support,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::classes::LabelEncoder;

    fn encoder() -> FittedEncoder {
        LabelEncoder::fit(["politics", "sports"]).unwrap()
    }

    #[test]
    fn test_metrics() {
        // politics: 1 of 2 found, 1 of 1 predictions right; sports: 2 of 2 found, 2 of 3 right
        let report = Report::new(Split::Test, &encoder(), &[0, 0, 1, 1], vec![0, 1, 1, 1]);

        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.classes[0].precision, 1.0);
        assert_eq!(report.classes[0].recall, 0.5);
        assert_eq!(report.classes[1].precision, 2.0 / 3.0);
        assert_eq!(report.classes[1].recall, 1.0);
        assert_eq!(report.classes[1].support, 2);
        assert_eq!(report.macro_avg.support, 4);
        assert!((report.macro_avg.recall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_class_missing_from_split_scores_zero() {
        let report = Report::new(Split::Val, &encoder(), &[1, 1], vec![1, 1]);

        assert_eq!(report.classes.len(), 2);
        assert_eq!(report.classes[0].support, 0);
        assert_eq!(report.classes[0].f1, 0.0);
        assert_eq!(report.weighted_avg.f1, 1.0);
    }

    #[test]
    fn test_display() {
        let report = Report::new(Split::Train, &encoder(), &[0, 1, 1], vec![0, 1, 1]);

        let expected = "\
train: accuracy: 1.0
              precision    recall  f1-score   support

    politics       1.00      1.00      1.00         1
      sports       1.00      1.00      1.00         2

    accuracy                           1.00         3
   macro avg       1.00      1.00      1.00         3
weighted avg       1.00      1.00      1.00         3
";

        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_display_without_table() {
        let report = Report::new(Split::Test, &encoder(), &[0], vec![1]).with_table(false);

        assert_eq!(report.to_string(), "test:  accuracy: 0.0\n");
    }

    #[test]
    fn test_write_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = encoder();
        let batch = Batch::new(
            Split::Test,
            vec!["a.txt".to_string(), "b.txt".to_string()],
            vec!["vote".to_string(), "goal".to_string()],
            vec![0, 1],
        );
        let report = Report::new(Split::Test, &encoder, &batch.targets, vec![0, 0]);

        write_predictions(dir.path(), &batch, &report, &encoder).unwrap();

        let written = std::fs::read_to_string(dir.path().join("test.csv")).unwrap();
        assert_eq!(
            written,
            "document,class,predicted\na.txt,politics,politics\nb.txt,sports,politics\n"
        );
    }
}
