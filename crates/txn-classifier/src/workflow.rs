use std::path::Path;

use txn_data_clean::{Dataset, LabelSet};

use crate::{store, ClassifierError, Config, Evaluation, Result, TrainedModel};

/// Where the model of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOrigin {
    Loaded,
    Trained,
}

/// Sample texts logged by the demo run.
pub const DEMO_TEXTS: &[&str] = &[
    "bought a chicken ?",
    "spend all my money",
    "Payment",
    "bought a bun",
    "buy nuts",
    "pay pall",
    "salary",
    "spend",
];

/// Loads a persisted model or trains and persists a new one.
pub struct Workflow {
    config: Config,
    labels: LabelSet,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let labels = config.label_set()?;
        Ok(Self { config, labels })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_or_train(&self) -> Result<(TrainedModel, ModelOrigin)> {
        let path = &self.config.model_path;
        if path.exists() {
            let model = store::load(path)?;
            if model.labels() != &self.labels {
                return Err(ClassifierError::Config(format!(
                    "model {} was trained for {}, configured labels are {}",
                    path.display(),
                    model.labels(),
                    self.labels
                )));
            }
            Ok((model, ModelOrigin::Loaded))
        } else {
            tracing::info!(path = %path.display(), "no saved model, training a new one");
            Ok((self.retrain()?, ModelOrigin::Trained))
        }
    }

    /// Trains from the configured training file and overwrites the saved model.
    pub fn retrain(&self) -> Result<TrainedModel> {
        let dataset = self.load_dataset(&self.config.train_path)?;
        let model = TrainedModel::fit(&dataset, &self.config.train)?;
        store::save(&model, &self.config.model_path)?;
        Ok(model)
    }

    /// Evaluates `model` on `test_path`, or on the configured test file.
    pub fn evaluate(&self, model: &TrainedModel, test_path: Option<&Path>) -> Result<Evaluation> {
        let path = test_path.unwrap_or(&self.config.test_path);
        let dataset = self.load_dataset(path)?;
        let evaluation = model.evaluate(&dataset)?;
        tracing::info!(
            path = %path.display(),
            accuracy = evaluation.accuracy(),
            "evaluated model"
        );
        Ok(evaluation)
    }

    fn load_dataset(&self, path: &Path) -> Result<Dataset> {
        let dataset = Dataset::from_file(path, &self.labels)?;
        let report = dataset.report();
        if !report.skipped.is_empty() {
            tracing::warn!(
                path = %path.display(),
                malformed = report.malformed(),
                unknown_labels = report.unknown_labels(),
                "skipped rows"
            );
        }
        Ok(dataset)
    }
}
