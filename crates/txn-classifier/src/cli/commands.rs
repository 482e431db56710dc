use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use txn_classifier::{Config, Variant};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load or train the model, run the sample predictions and one evaluation
    Demo,

    /// Train from the training file and overwrite the saved model
    Train,

    /// Print the predicted label of each text
    Predict(PredictArgs),

    /// Score the model against the test file
    Evaluate,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Transaction descriptions to classify
    #[arg(required = true)]
    pub texts: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VariantArg {
    DebitCredit,
    IncomeOutcome,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::DebitCredit => Variant::DebitCredit,
            VariantArg::IncomeOutcome => Variant::IncomeOutcome,
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// TOML configuration file; replaces the variant preset
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Label vocabulary and default file locations
    #[arg(long, value_enum, default_value = "income-outcome", global = true)]
    pub variant: VariantArg,

    /// Training file, one `<label> <text>` example per line
    #[arg(long, global = true)]
    pub train: Option<PathBuf>,

    /// Held-out test file in the training format
    #[arg(long, global = true)]
    pub test: Option<PathBuf>,

    /// Where the trained model is saved and loaded
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn resolve(&self) -> txn_classifier::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Variant::from(self.variant).config(),
        };
        if let Some(path) = &self.train {
            config.train_path = path.clone();
        }
        if let Some(path) = &self.test {
            config.test_path = path.clone();
        }
        if let Some(path) = &self.model {
            config.model_path = path.clone();
        }
        Ok(config)
    }
}
