//! Loading and bag-of-words preparation of labeled transaction descriptions.
//!
//! Input files hold one `<label><whitespace><text>` example per line. Lines
//! that cannot be split into a known label and a non-empty text are skipped
//! and recorded in the dataset's [`LoadReport`].

mod dataset;
mod error;
mod label;
mod tokenize;
mod vectorize;

pub use dataset::{parse_line, Dataset, LabeledExample, LoadReport, RowIssue, SkippedRow};
pub use error::DataError;
pub use label::LabelSet;
pub use tokenize::{english_stop_words, tokenize};
pub use vectorize::{bag_of_words, Vectorizer, VectorizerConfig};
