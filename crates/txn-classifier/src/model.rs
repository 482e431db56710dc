use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::naive_bayes::multinomial::{MultinomialNB, MultinomialNBParameters};
use txn_data_clean::{Dataset, LabelSet, Vectorizer};

use crate::{ClassifierError, Evaluation, Result, TrainConfig};

type NaiveBayes = MultinomialNB<usize, usize, DenseMatrix<usize>, Vec<usize>>;

/// A fitted vocabulary together with the multinomial Naive Bayes model trained on it.
///
/// The model is never mutated after [`TrainedModel::fit`] or a load from disk,
/// so shared references can be used for prediction from several threads.
#[derive(Serialize, Deserialize)]
pub struct TrainedModel {
    labels: LabelSet,
    vectorizer: Vectorizer,
    classifier: NaiveBayes,
}

impl TrainedModel {
    pub fn fit(dataset: &Dataset, config: &TrainConfig) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ClassifierError::Library(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        if !(config.alpha.is_finite() && config.alpha > 0.0) {
            return Err(ClassifierError::Config(format!(
                "smoothing alpha must be a finite number above zero, got {}",
                config.alpha
            )));
        }
        let vectorizer = Vectorizer::fit(dataset, &config.vectorizer)?;
        let (x, y) = vectorizer.transform_dataset(dataset)?;

        let params = MultinomialNBParameters::default().with_alpha(config.alpha);
        let classifier = MultinomialNB::fit(&x, &y, params)?;

        tracing::info!(
            examples = dataset.len(),
            vocabulary = vectorizer.len(),
            alpha = config.alpha,
            "trained multinomial naive bayes"
        );
        Ok(Self {
            labels: dataset.labels().clone(),
            vectorizer,
            classifier,
        })
    }

    /// Checks that the vocabulary, the class indices and the fitted
    /// likelihood table agree, so that prediction cannot index out of bounds.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        if !self.vectorizer.is_consistent() {
            return Err("vocabulary indices are not a permutation of 0..len".to_string());
        }
        let n_features = self.classifier.n_features();
        if n_features != self.vectorizer.len() {
            return Err(format!(
                "vocabulary has {} tokens but the classifier expects {n_features} features",
                self.vectorizer.len()
            ));
        }
        let classes = self.classifier.classes();
        if classes.is_empty() || classes.iter().any(|&class| class >= self.labels.len()) {
            return Err(format!(
                "classifier classes {classes:?} do not fit the {} labels",
                self.labels.len()
            ));
        }
        let log_probs = self.classifier.feature_log_prob();
        if log_probs.len() != classes.len()
            || log_probs
                .iter()
                .any(|row| row.len() != n_features || row.iter().any(|p| p.is_nan()))
        {
            return Err("likelihood table does not match classes and features".to_string());
        }
        Ok(())
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Most likely label for `text`.
    ///
    /// Text without any known token scores on class priors alone.
    pub fn predict(&self, text: &str) -> Result<&str> {
        let mut labels = self.predict_batch([text])?;
        labels
            .pop()
            .ok_or_else(|| ClassifierError::Library("no prediction returned".to_string()))
    }

    pub fn predict_batch<'a, I>(&self, texts: I) -> Result<Vec<&str>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let indices = self.predict_indices(texts)?;
        indices
            .into_iter()
            .map(|index| {
                self.labels.name(index).ok_or_else(|| {
                    ClassifierError::Library(format!("predicted unknown class index {index}"))
                })
            })
            .collect()
    }

    fn predict_indices<'a, I>(&self, texts: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let x = self.vectorizer.transform_batch(texts)?;
        Ok(self.classifier.predict(&x)?)
    }

    /// Scores the model against a labeled dataset.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<Evaluation> {
        if dataset.is_empty() {
            return Err(ClassifierError::Library(
                "cannot evaluate on an empty dataset".to_string(),
            ));
        }
        if dataset.labels() != &self.labels {
            return Err(ClassifierError::Config(format!(
                "model labels {} do not match dataset labels {}",
                self.labels,
                dataset.labels()
            )));
        }
        let actual = dataset.label_indices();
        let predicted = self.predict_indices(dataset.iter().map(|e| e.text.as_str()))?;
        Ok(Evaluation::new(&self.labels, &actual, &predicted))
    }
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("labels", &self.labels)
            .field("vocabulary", &self.vectorizer.len())
            .finish_non_exhaustive()
    }
}
