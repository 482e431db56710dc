use std::path::PathBuf;

/// Errors raised while loading or vectorizing transaction datasets.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid label set: {0}")]
    InvalidLabels(String),
    #[error("label `{0}` is not part of the label set")]
    UnknownLabel(String),
    #[error("example {index} has an empty label or text")]
    EmptyExample { index: usize },
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("no token survived vectorization, the vocabulary is empty")]
    EmptyVocabulary,
    #[error("no stop word list available for {0}")]
    StopWordsUnavailable(&'static str),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::FileNotFound { path }
        } else {
            DataError::Io { path, source }
        }
    }
}
