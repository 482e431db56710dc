use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{DataError, LabelSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub label: String,
    pub text: String,
}

/// Why a line was left out of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    Blank,
    MissingText,
    UnknownLabel(String),
    InvalidEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number.
    pub line: usize,
    pub issue: RowIssue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines_read: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn kept(&self) -> usize {
        self.lines_read - self.skipped.len()
    }

    /// Rows without both a label and a text.
    pub fn malformed(&self) -> usize {
        self.skipped
            .iter()
            .filter(|row| !matches!(row.issue, RowIssue::UnknownLabel(_)))
            .count()
    }

    pub fn unknown_labels(&self) -> usize {
        self.skipped.len() - self.malformed()
    }
}

/// Splits a line into its label and the rest of the line.
pub fn parse_line(line: &str) -> Result<(&str, &str), RowIssue> {
    let line = line.trim();
    if line.is_empty() {
        return Err(RowIssue::Blank);
    }
    let (label, text) = line
        .split_once(char::is_whitespace)
        .ok_or(RowIssue::MissingText)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(RowIssue::MissingText);
    }
    Ok((label, text))
}

/// Labeled transaction descriptions, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    labels: LabelSet,
    examples: Vec<LabeledExample>,
    report: LoadReport,
}

impl Dataset {
    pub fn from_file<P>(path: P, labels: &LabelSet) -> Result<Self, DataError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DataError::io(path, e))?;
        let dataset = Self::read(BufReader::new(file), labels, path)?;
        tracing::info!(
            path = %path.display(),
            examples = dataset.len(),
            malformed = dataset.report.malformed(),
            unknown_labels = dataset.report.unknown_labels(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn parse_lines<R: BufRead>(reader: R, labels: &LabelSet) -> Result<Self, DataError> {
        Self::read(reader, labels, Path::new("<reader>"))
    }

    fn read<R: BufRead>(
        mut reader: R,
        labels: &LabelSet,
        origin: &Path,
    ) -> Result<Self, DataError> {
        let mut examples = Vec::new();
        let mut report = LoadReport::default();
        let mut buf = Vec::new();

        for index in 0.. {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| DataError::io(origin, e))?;
            if read == 0 {
                break;
            }
            report.lines_read += 1;

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) => parse_line(line),
                Err(_) => Err(RowIssue::InvalidEncoding),
            };
            let issue = match parsed {
                Ok((label, _)) if labels.index_of(label).is_none() => {
                    RowIssue::UnknownLabel(label.to_string())
                }
                Ok((label, text)) => {
                    examples.push(LabeledExample {
                        label: label.to_string(),
                        text: text.to_string(),
                    });
                    continue;
                }
                Err(issue) => issue,
            };

            tracing::debug!(line = index + 1, ?issue, "skipping row");
            report.skipped.push(SkippedRow {
                line: index + 1,
                issue,
            });
        }

        Ok(Self {
            labels: labels.clone(),
            examples,
            report,
        })
    }

    /// Builds a dataset from in-memory examples. Every label must belong to `labels`
    /// and every text must hold something besides whitespace.
    pub fn from_examples(
        labels: &LabelSet,
        examples: Vec<LabeledExample>,
    ) -> Result<Self, DataError> {
        if let Some(index) = examples
            .iter()
            .position(|e| e.label.trim().is_empty() || e.text.trim().is_empty())
        {
            return Err(DataError::EmptyExample { index });
        }
        if let Some(bad) = examples.iter().find(|e| labels.index_of(&e.label).is_none()) {
            return Err(DataError::UnknownLabel(bad.label.clone()));
        }
        let report = LoadReport {
            lines_read: examples.len(),
            skipped: Vec::new(),
        };
        Ok(Self {
            labels: labels.clone(),
            examples,
            report,
        })
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledExample> {
        self.examples.iter()
    }

    /// Class index of every example, in order.
    pub fn label_indices(&self) -> Vec<usize> {
        self.examples
            .iter()
            .filter_map(|e| self.labels.index_of(&e.label))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
