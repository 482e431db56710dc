use std::path::PathBuf;

use txn_data_clean::DataError;

/// Errors surfaced by training, inference, evaluation and model persistence.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model serialization failed: {0}")]
    Serialization(String),
    #[error("classifier library error: {0}")]
    Library(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClassifierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ClassifierError::FileNotFound { path }
        } else {
            ClassifierError::Io { path, source }
        }
    }
}

impl From<DataError> for ClassifierError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::FileNotFound { path } => ClassifierError::FileNotFound { path },
            DataError::Io { path, source } => ClassifierError::Io { path, source },
            DataError::InvalidLabels(_)
            | DataError::UnknownLabel(_)
            | DataError::EmptyExample { .. } => {
                ClassifierError::Config(err.to_string())
            }
            DataError::EmptyDataset
            | DataError::EmptyVocabulary
            | DataError::StopWordsUnavailable(_) => ClassifierError::Library(err.to_string()),
        }
    }
}

impl From<smartcore::error::Failed> for ClassifierError {
    fn from(err: smartcore::error::Failed) -> Self {
        ClassifierError::Library(err.to_string())
    }
}

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;
