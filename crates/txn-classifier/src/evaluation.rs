use std::fmt;

use smartcore::metrics::accuracy::Accuracy;
use smartcore::metrics::Metrics;
use txn_data_clean::LabelSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Scores of a model against a labeled test set.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    labels: Vec<String>,
    /// `confusion[actual][predicted]`
    confusion: Vec<Vec<usize>>,
    accuracy: f64,
    kappa: f64,
}

impl Evaluation {
    /// `actual` and `predicted` hold class indices into `labels`, pairwise.
    /// Extra entries in the longer slice are ignored.
    pub(crate) fn new(labels: &LabelSet, actual: &[usize], predicted: &[usize]) -> Self {
        let n = labels.len();
        let mut confusion = vec![vec![0; n]; n];
        for (&a, &p) in actual.iter().zip(predicted) {
            if a < n && p < n {
                confusion[a][p] += 1;
            }
        }

        let len = actual.len().min(predicted.len());
        let y_true = actual[..len].to_vec();
        let y_pred = predicted[..len].to_vec();
        let accuracy = Accuracy::<usize>::new().get_score(&y_true, &y_pred);

        let mut evaluation = Self {
            labels: labels.iter().map(str::to_string).collect(),
            confusion,
            accuracy,
            kappa: 0.0,
        };
        evaluation.kappa = evaluation.compute_kappa();
        evaluation
    }

    fn compute_kappa(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        let observed = self.correct() as f64 / total;
        let expected: f64 = (0..self.labels.len())
            .map(|k| self.actual_count(k) as f64 * self.predicted_count(k) as f64)
            .sum::<f64>()
            / (total * total);
        if expected >= 1.0 {
            1.0
        } else {
            (observed - expected) / (1.0 - expected)
        }
    }

    fn actual_count(&self, class: usize) -> usize {
        self.confusion[class].iter().sum()
    }

    fn predicted_count(&self, class: usize) -> usize {
        self.confusion.iter().map(|row| row[class]).sum()
    }

    pub fn total(&self) -> usize {
        self.confusion.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|k| self.confusion[k][k]).sum()
    }

    pub fn incorrect(&self) -> usize {
        self.total() - self.correct()
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn confusion_matrix(&self) -> &[Vec<usize>] {
        &self.confusion
    }

    pub fn per_class(&self) -> Vec<ClassMetrics> {
        self.labels
            .iter()
            .enumerate()
            .map(|(k, label)| {
                let hits = self.confusion[k][k] as f64;
                let support = self.actual_count(k);
                let predicted = self.predicted_count(k);
                let precision = ratio(hits, predicted as f64);
                let recall = ratio(hits, support as f64);
                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support,
                }
            })
            .collect()
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        let pct = |count: usize| 100.0 * ratio(count as f64, total as f64);

        writeln!(
            f,
            "Correctly Classified Instances   {:>8} {:>10.4} %",
            self.correct(),
            pct(self.correct())
        )?;
        writeln!(
            f,
            "Incorrectly Classified Instances {:>8} {:>10.4} %",
            self.incorrect(),
            pct(self.incorrect())
        )?;
        writeln!(f, "Kappa statistic                  {:>8.4}", self.kappa)?;
        writeln!(f, "Total Number of Instances        {total:>8}")?;

        writeln!(f, "\n=== Detailed Accuracy By Class ===\n")?;
        writeln!(f, "{:>10} {:>10} {:>10} {:>8}  Class", "Precision", "Recall", "F1", "Support")?;
        for class in self.per_class() {
            writeln!(
                f,
                "{:>10.3} {:>10.3} {:>10.3} {:>8}  {}",
                class.precision, class.recall, class.f1, class.support, class.label
            )?;
        }

        writeln!(f, "\n=== Confusion Matrix ===\n")?;
        for (k, _) in self.labels.iter().enumerate() {
            write!(f, "{:>6}", column_name(k))?;
        }
        writeln!(f, "   <-- classified as")?;
        for (k, row) in self.confusion.iter().enumerate() {
            for count in row {
                write!(f, "{count:>6}")?;
            }
            writeln!(f, " | {} = {}", column_name(k), self.labels[k])?;
        }
        Ok(())
    }
}

fn column_name(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

#[cfg(test)]
mod test {
    use txn_data_clean::LabelSet;

    use super::Evaluation;

    #[test]
    fn test_metrics_from_predictions() {
        let labels = LabelSet::new(["debit", "credit"]).unwrap();
        // debit: 3 right, 1 called credit. credit: 1 right, 1 called debit.
        let actual = [0, 0, 0, 0, 1, 1];
        let predicted = [0, 0, 0, 1, 1, 0];
        let eval = Evaluation::new(&labels, &actual, &predicted);

        assert_eq!(eval.total(), 6);
        assert_eq!(eval.correct(), 4);
        assert_eq!(eval.incorrect(), 2);
        assert!((eval.accuracy() - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(eval.confusion_matrix().to_vec(), vec![vec![3, 1], vec![1, 1]]);

        let per_class = eval.per_class();
        assert!((per_class[0].precision - 0.75).abs() < 1e-9);
        assert!((per_class[0].recall - 0.75).abs() < 1e-9);
        assert!((per_class[1].precision - 0.5).abs() < 1e-9);
        assert!((per_class[1].recall - 0.5).abs() < 1e-9);
        assert_eq!(per_class[1].support, 2);

        // p_o = 4/6, p_e = (4*4 + 2*2) / 36 = 20/36
        let kappa = (4.0 / 6.0 - 20.0 / 36.0) / (1.0 - 20.0 / 36.0);
        assert!((eval.kappa() - kappa).abs() < 1e-9);
    }

    #[test]
    fn test_class_never_predicted() {
        let labels = LabelSet::new(["income", "outcome"]).unwrap();
        let eval = Evaluation::new(&labels, &[0, 1], &[0, 0]);
        let per_class = eval.per_class();
        assert_eq!(per_class[1].precision, 0.0);
        assert_eq!(per_class[1].recall, 0.0);
        assert_eq!(per_class[1].f1, 0.0);
    }

    #[test]
    fn test_summary_lists_classes() {
        let labels = LabelSet::new(["debit", "credit"]).unwrap();
        let summary = Evaluation::new(&labels, &[0, 1], &[0, 1]).to_string();
        assert!(summary.contains("Correctly Classified Instances"));
        assert!(summary.contains("a = debit"));
        assert!(summary.contains("b = credit"));
    }
}
