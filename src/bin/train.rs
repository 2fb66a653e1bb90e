//! Command line tool to train and evaluate a text classifier

use std::path::PathBuf;

use anyhow::anyhow;
use bow_classifier::{
    pipelines::text_classification::{train, ClassifierKind, Config, VectorizerKind},
    preprocessing::Normalization,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [CONFIG] [OPTIONS]

Arguments:
  CONFIG                A .json, .yaml or .yml config file (optional if --train is given)

Options:
  -h, --help            Print help
  --train DIR           The training split, laid out as DIR/<class>/<document>.txt
  --val DIR             The validation split
  --test DIR            The test split
  -v, --vectorizer      count or tfidf (defaults to count)
  -c, --classifier      multinomial-nb, bernoulli-nb, random-forest, knn or svm (defaults to svm)
  -n, --normalization   stemming or lemmatizing (defaults to stemming)
  -s, --seed            Seed for the training shuffle and random forest
  -p, --predictions     Write <split>.csv prediction files into this directory
  --no-report           Print accuracy only, without the per-class tables
";

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    train: Option<PathBuf>,
    val: Option<PathBuf>,
    test: Option<PathBuf>,
    vectorizer: Option<VectorizerKind>,
    classifier: Option<ClassifierKind>,
    normalization: Option<Normalization>,
    seed: Option<u64>,
    predictions: Option<PathBuf>,
    report: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            train: pargs.opt_value_from_str("--train")?,
            val: pargs.opt_value_from_str("--val")?,
            test: pargs.opt_value_from_str("--test")?,
            vectorizer: pargs.opt_value_from_str(["-v", "--vectorizer"])?,
            classifier: pargs.opt_value_from_str(["-c", "--classifier"])?,
            normalization: pargs.opt_value_from_str(["-n", "--normalization"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            predictions: pargs.opt_value_from_str(["-p", "--predictions"])?,
            report: !(pargs.contains("--no-report")),
            config: pargs.opt_free_from_str()?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    /// Start from the config file, if any, and let flags override it
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match (&self.config, &self.train) {
            (Some(path), _) => Config::load(path)?,
            (None, Some(train)) => Config::new(train.clone()),
            (None, None) => return Err(anyhow!("Missing required argument: CONFIG or --train")),
        };

        if let Some(train) = self.train {
            config.train_data = train;
        }

        if self.val.is_some() {
            config = config.with_val_data(self.val);
        }

        if self.test.is_some() {
            config = config.with_test_data(self.test);
        }

        if let Some(vectorizer) = self.vectorizer {
            config = config.with_vectorizer(vectorizer);
        }

        if let Some(classifier) = self.classifier {
            config = config.with_classifier(classifier);
        }

        if let Some(normalization) = self.normalization {
            config = config.with_normalization(normalization);
        }

        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }

        if self.predictions.is_some() {
            config = config.with_predictions_dir(self.predictions);
        }

        if !self.report {
            config = config.with_report(false);
        }

        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let output = Args::parse()?;

    let Some(args) = output else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.into_config()?;

    train(&config).await?;

    Ok(())
}
