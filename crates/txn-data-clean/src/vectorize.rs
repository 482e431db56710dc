use std::collections::{hash_map::Entry, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array1, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::numbers::basenum::Number;

use crate::{english_stop_words, tokenize, DataError, Dataset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub lowercase: bool,
    /// Drop English stop words before building the vocabulary.
    pub stop_words: bool,
    /// Minimum number of occurrences in the training set for a token to be kept.
    pub min_term_freq: usize,
    /// Keep only the N most frequent tokens.
    pub max_features: Option<usize>,
    /// Emit 0/1 presence instead of counts.
    pub binary: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            stop_words: false,
            min_term_freq: 1,
            max_features: None,
            binary: false,
        }
    }
}

/// Bag-of-words vectorizer with a vocabulary fitted on a training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vectorizer {
    config: VectorizerConfig,
    vocabulary: HashMap<String, usize>,
}

impl Vectorizer {
    /// Builds the vocabulary from `dataset`. Indices follow first appearance.
    pub fn fit(dataset: &Dataset, config: &VectorizerConfig) -> Result<Self, DataError> {
        if dataset.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let stops = if config.stop_words {
            Some(english_stop_words()?)
        } else {
            None
        };

        let mut seen = Vec::new();
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for example in dataset.iter() {
            for token in tokenize(&example.text, config.lowercase) {
                if stops.as_ref().is_some_and(|s| s.contains(token.to_lowercase().as_str())) {
                    continue;
                }
                match frequencies.entry(token) {
                    Entry::Occupied(mut entry) => *entry.get_mut() += 1,
                    Entry::Vacant(entry) => {
                        seen.push(entry.key().clone());
                        entry.insert(1);
                    }
                }
            }
        }

        let mut kept: Vec<(usize, &String)> = seen
            .iter()
            .enumerate()
            .filter(|(_, token)| frequencies[*token] >= config.min_term_freq)
            .collect();

        if let Some(max) = config.max_features {
            if kept.len() > max {
                kept.sort_by(|a, b| {
                    frequencies[b.1]
                        .cmp(&frequencies[a.1])
                        .then(a.0.cmp(&b.0))
                });
                kept.truncate(max);
                kept.sort_by_key(|(first_seen, _)| *first_seen);
            }
        }

        let vocabulary: HashMap<String, usize> = kept
            .into_iter()
            .enumerate()
            .map(|(index, (_, token))| (token.clone(), index))
            .collect();
        if vocabulary.is_empty() {
            return Err(DataError::EmptyVocabulary);
        }

        tracing::debug!(
            tokens = seen.len(),
            vocabulary = vocabulary.len(),
            "fitted vocabulary"
        );
        Ok(Self {
            config: config.clone(),
            vocabulary,
        })
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the token indices are exactly `0..len`, each used once.
    pub fn is_consistent(&self) -> bool {
        let indices: HashSet<usize> = self.vocabulary.values().copied().collect();
        indices.len() == self.len() && indices.iter().all(|&index| index < self.len())
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        let mut tokens = tokenize(text, self.config.lowercase);
        if self.config.binary {
            tokens.sort();
            tokens.dedup();
        }
        tokens
    }

    /// Count vector for `text`. Tokens outside the vocabulary are ignored.
    pub fn transform<T: Number>(&self, text: &str) -> Vec<T> {
        bag_of_words(self.tokens(text), &self.vocabulary)
    }

    pub fn transform_batch<'a, I>(&self, texts: I) -> Result<DenseMatrix<usize>, DataError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let rows: Vec<Vec<usize>> = texts.into_iter().map(|t| self.transform(t)).collect();
        if rows.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        Ok(DenseMatrix::from_2d_vec(&rows))
    }

    /// Feature matrix and class indices for every example of `dataset`.
    pub fn transform_dataset(
        &self,
        dataset: &Dataset,
    ) -> Result<(DenseMatrix<usize>, Vec<usize>), DataError> {
        let x = self.transform_batch(dataset.iter().map(|e| e.text.as_str()))?;
        Ok((x, dataset.label_indices()))
    }
}

pub fn bag_of_words<T: Number>(tokens: Vec<String>, vocabulary: &HashMap<String, usize>) -> Vec<T> {
    let mut m = Vec::zeros(vocabulary.len());

    for token in tokens {
        if let Some(index) = vocabulary.get(&token) {
            m.add_element_mut(*index, T::one());
        }
    }

    m
}

#[cfg(test)]
mod test {
    use crate::{Dataset, LabelSet, LabeledExample, Vectorizer, VectorizerConfig};

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        let labels = LabelSet::new(["debit", "credit"]).unwrap();
        let examples = rows
            .iter()
            .map(|(label, text)| LabeledExample {
                label: label.to_string(),
                text: text.to_string(),
            })
            .collect();
        Dataset::from_examples(&labels, examples).unwrap()
    }

    #[test]
    fn test_vocabulary_in_first_appearance_order() {
        let data = dataset(&[("debit", "Buy nuts, buy BREAD"), ("credit", "salary")]);
        let vectorizer = Vectorizer::fit(&data, &VectorizerConfig::default()).unwrap();
        assert_eq!(vectorizer.len(), 4);
        assert_eq!(vectorizer.vocabulary()["buy"], 0);
        assert_eq!(vectorizer.vocabulary()["nuts"], 1);
        assert_eq!(vectorizer.vocabulary()["bread"], 2);
        assert_eq!(vectorizer.vocabulary()["salary"], 3);

        let row: Vec<usize> = vectorizer.transform("buy buy unknown SALARY");
        assert_eq!(row, vec![2, 0, 0, 1]);
    }

    #[test]
    fn test_binary_counts() {
        let data = dataset(&[("debit", "buy nuts"), ("credit", "salary")]);
        let config = VectorizerConfig {
            binary: true,
            ..Default::default()
        };
        let vectorizer = Vectorizer::fit(&data, &config).unwrap();
        let row: Vec<usize> = vectorizer.transform("buy buy buy salary");
        assert_eq!(row, vec![1, 0, 1]);
    }

    #[test]
    fn test_frequency_limits() {
        let data = dataset(&[
            ("debit", "shop shop fuel"),
            ("debit", "fuel shop rent"),
            ("credit", "salary bonus salary"),
        ]);
        let config = VectorizerConfig {
            min_term_freq: 2,
            ..Default::default()
        };
        let vectorizer = Vectorizer::fit(&data, &config).unwrap();
        assert_eq!(vectorizer.len(), 3);
        assert!(!vectorizer.vocabulary().contains_key("rent"));

        let config = VectorizerConfig {
            max_features: Some(2),
            ..Default::default()
        };
        let vectorizer = Vectorizer::fit(&data, &config).unwrap();
        assert_eq!(vectorizer.vocabulary()["shop"], 0);
        assert_eq!(vectorizer.vocabulary()["fuel"], 1);
    }

    #[test]
    fn test_stop_words_removed() {
        let data = dataset(&[("debit", "paid for the coffee"), ("credit", "the salary")]);
        let config = VectorizerConfig {
            stop_words: true,
            ..Default::default()
        };
        let vectorizer = Vectorizer::fit(&data, &config).unwrap();
        assert!(!vectorizer.vocabulary().contains_key("the"));
        assert!(!vectorizer.vocabulary().contains_key("for"));
        assert!(vectorizer.vocabulary().contains_key("salary"));
        assert!(vectorizer.is_consistent());
    }

    #[test]
    fn test_stop_words_match_any_case() {
        let data = dataset(&[("debit", "The Coffee"), ("credit", "The Salary")]);
        let config = VectorizerConfig {
            lowercase: false,
            stop_words: true,
            ..Default::default()
        };
        let vectorizer = Vectorizer::fit(&data, &config).unwrap();
        assert!(!vectorizer.vocabulary().contains_key("The"));
        assert!(vectorizer.vocabulary().contains_key("Salary"));
        assert!(vectorizer.vocabulary().contains_key("Coffee"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let data = dataset(&[("debit", "?!"), ("credit", "...")]);
        assert!(Vectorizer::fit(&data, &VectorizerConfig::default()).is_err());
    }
}
