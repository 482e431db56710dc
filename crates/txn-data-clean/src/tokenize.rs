use std::collections::HashSet;

use stopwords::{Language, Stopwords, NLTK};

use crate::DataError;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `text` into unigrams on every non-word character.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(|token| {
            if lowercase {
                token.to_lowercase()
            } else {
                token.to_string()
            }
        })
        .collect()
}

pub fn english_stop_words() -> Result<HashSet<&'static str>, DataError> {
    NLTK::stopwords(Language::English)
        .map(|words| words.iter().copied().collect())
        .ok_or(DataError::StopWordsUnavailable("english"))
}
