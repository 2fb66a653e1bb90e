use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    datasets::{load_split, Corpus, DatasetError, Document, LoadableDataset, Split},
    preprocessing::Tokenizer,
    utils::classes::LabelEncoder,
};

use super::{
    evaluation::{evaluate, write_predictions, Report},
    model::Problem,
    vectorizer::Vectorizer,
    Batch, Batcher, Config, TrainedPipeline,
};

/// Load every split, fit the encoder and pipeline on train, then report on each present split.
///
/// Reports are printed to stdout as they are produced and returned in train, val, test order.
pub async fn train(config: &Config) -> anyhow::Result<Vec<Report>> {
    info!(
        "Training {} + {} with {:?}",
        config.vectorizer, config.classifier, config.normalization
    );

    let train = Corpus::load(&config.train_data).await?;
    let val = load_split(config.val_data.as_deref()).await?;
    let test = load_split(config.test_data.as_deref()).await?;

    if train.is_empty() {
        return Err(DatasetError::Empty(config.train_data.display().to_string()).into());
    }

    let encoder = LabelEncoder::fit(train.labels())?;
    info!("{} classes: {}", encoder.len(), encoder.classes().join(", "));

    let tokenizer = Tokenizer::new(config.normalization);
    let batcher = Batcher::new(&tokenizer, &encoder);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut train = batcher.batch(Split::Train, train.documents())?;
    train.shuffle(&mut rng);

    let val = prepare(&batcher, Split::Val, val)?;
    let test = prepare(&batcher, Split::Test, test)?;

    let vectorizer = Vectorizer::fit(config.vectorizer, &train.inputs)?;
    let problem = Problem::new(
        config.classifier,
        vectorizer.transform(&train.inputs),
        &train.targets,
        encoder.len(),
        config.seed.unwrap_or_else(|| rng.gen()),
    )?;
    let pipeline = TrainedPipeline::new(vectorizer, problem.fit()?);

    let mut reports = Vec::new();

    for batch in [Some(&train), val.as_ref(), test.as_ref()] {
        if let Some(report) = evaluate(&pipeline, &encoder, batch)? {
            let report = report.with_table(config.report);
            println!("{}", report);

            if let (Some(dir), Some(batch)) = (&config.predictions_dir, batch) {
                write_predictions(dir, batch, &report, &encoder)?;
            }

            reports.push(report);
        }
    }

    Ok(reports)
}

/// Prepare an optional split; a split that loaded no documents is treated as absent
fn prepare(
    batcher: &Batcher<'_>,
    split: Split,
    corpus: Option<Corpus>,
) -> anyhow::Result<Option<Batch>> {
    match corpus {
        Some(corpus) if !corpus.is_empty() => {
            let batch = batcher.batch::<Document>(split, corpus.documents())?;

            Ok(Some(batch))
        }
        Some(corpus) => {
            warn!(
                "Skipping the {} split: no documents under {}",
                split,
                corpus.root().display()
            );

            Ok(None)
        }
        None => Ok(None),
    }
}
