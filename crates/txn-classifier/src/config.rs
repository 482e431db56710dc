use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use txn_data_clean::{LabelSet, VectorizerConfig};

use crate::{ClassifierError, Result};

/// Label vocabularies and file locations shipped with the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    DebitCredit,
    IncomeOutcome,
}

impl Variant {
    pub fn labels(self) -> [&'static str; 2] {
        match self {
            Variant::DebitCredit => ["debit", "credit"],
            Variant::IncomeOutcome => ["income", "outcome"],
        }
    }

    pub fn config(self) -> Config {
        let (train, test, model) = match self {
            Variant::DebitCredit => (
                "dataset/train_debit_credit.txt",
                "dataset/test_debit_credit.txt",
                "model/debit_credit_model.dat",
            ),
            Variant::IncomeOutcome => (
                "dataset/train_income_outcome.txt",
                "dataset/test_income_outcome.txt",
                "model/income_outcome_model.dat",
            ),
        };
        Config {
            labels: self.labels().iter().map(|l| l.to_string()).collect(),
            train_path: train.into(),
            test_path: test.into(),
            model_path: model.into(),
            train: TrainConfig::default(),
        }
    }
}

/// Hyperparameters for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Additive smoothing for token likelihoods. 1.0 is Laplace smoothing.
    pub alpha: f64,
    pub vectorizer: VectorizerConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            vectorizer: VectorizerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub labels: Vec<String>,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub model_path: PathBuf,
    #[serde(default)]
    pub train: TrainConfig,
}

impl Default for Config {
    fn default() -> Self {
        Variant::IncomeOutcome.config()
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ClassifierError::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn label_set(&self) -> Result<LabelSet> {
        Ok(LabelSet::new(self.labels.iter().cloned())?)
    }
}
