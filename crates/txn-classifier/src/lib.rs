//! Multinomial Naive Bayes classification of transaction descriptions.
//!
//! A [`TrainedModel`] pairs a bag-of-words vocabulary with a smartcore
//! `MultinomialNB`. The [`store`] module persists it and [`Workflow`] decides
//! between loading a saved model and training a new one.

mod config;
mod error;
mod evaluation;
mod model;
pub mod store;
mod workflow;

pub use config::{Config, TrainConfig, Variant};
pub use error::{ClassifierError, Result};
pub use evaluation::{ClassMetrics, Evaluation};
pub use model::TrainedModel;
pub use workflow::{ModelOrigin, Workflow, DEMO_TEXTS};

pub use txn_data_clean::{Dataset, LabelSet, LabeledExample, VectorizerConfig};
