use std::path::Path;

use txn_classifier::{
    store, ClassifierError, Config, Dataset, ModelOrigin, TrainConfig, TrainedModel, Variant,
    Workflow,
};

const TRAIN: &str = "\
debit bought a chicken
credit salary payment
debit buy nuts
credit profit received
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn config(dir: &Path) -> Config {
    Config {
        train_path: write(dir, "train.txt", TRAIN),
        test_path: write(dir, "test.txt", "debit buy nuts\ncredit salary payment\ncredit profit\n"),
        model_path: dir.join("model").join("debit_credit_model.dat"),
        ..Variant::DebitCredit.config()
    }
}

#[test]
fn test_trains_on_first_run_then_loads() {
    let dir = tempfile::tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();

    let (trained, origin) = workflow.load_or_train().unwrap();
    assert_eq!(origin, ModelOrigin::Trained);
    assert!(workflow.config().model_path.exists());

    let (loaded, origin) = workflow.load_or_train().unwrap();
    assert_eq!(origin, ModelOrigin::Loaded);

    for text in ["salary", "bought a bun", "spend all my money", "Payment"] {
        assert_eq!(loaded.predict(text).unwrap(), trained.predict(text).unwrap());
    }
    assert_eq!(loaded.predict("salary").unwrap(), "credit");
    assert_eq!(loaded.predict("bought a bun").unwrap(), "debit");
}

#[test]
fn test_evaluation_on_known_vocabulary_is_perfect() {
    let dir = tempfile::tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let (model, _) = workflow.load_or_train().unwrap();

    let evaluation = workflow.evaluate(&model, None).unwrap();
    assert_eq!(evaluation.total(), 3);
    assert_eq!(evaluation.accuracy(), 1.0);
    assert_eq!(evaluation.incorrect(), 0);
    for class in evaluation.per_class() {
        assert_eq!(class.precision, 1.0);
        assert_eq!(class.recall, 1.0);
    }

    let train = workflow.config().train_path.clone();
    let evaluation = workflow.evaluate(&model, Some(train.as_path())).unwrap();
    assert_eq!(evaluation.accuracy(), 1.0);
}

#[test]
fn test_malformed_line_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "train.txt",
        "debit bought a chicken\ncredit salary payment\ncredit\ndebit buy nuts\ncredit profit received\n",
    );
    let labels = Variant::DebitCredit.config().label_set().unwrap();
    let dataset = Dataset::from_file(&path, &labels).unwrap();
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.report().malformed(), 1);
}

#[test]
fn test_missing_training_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.train_path = dir.path().join("absent.txt");
    let workflow = Workflow::new(config).unwrap();

    let err = workflow.load_or_train().unwrap_err();
    assert!(matches!(err, ClassifierError::FileNotFound { .. }));
    assert!(!workflow.config().model_path.exists());
}

#[test]
fn test_model_for_other_labels_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    Workflow::new(config.clone()).unwrap().retrain().unwrap();

    let other = Config {
        labels: vec!["income".to_string(), "outcome".to_string()],
        ..config
    };
    let err = Workflow::new(other).unwrap().load_or_train().unwrap_err();
    assert!(matches!(err, ClassifierError::Config(_)));
}

#[test]
fn test_concurrent_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let labels = config.label_set().unwrap();
    let dataset = Dataset::from_file(&config.train_path, &labels).unwrap();
    let model = TrainedModel::fit(&dataset, &TrainConfig::default()).unwrap();
    store::save(&model, &config.model_path).unwrap();
    let model = store::load(&config.model_path).unwrap();

    let samples = ["salary", "bought a bun", "buy nuts", "profit received"];
    let expected: Vec<&str> = samples.iter().map(|p| model.predict(p).unwrap()).collect();

    let model = &model;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| {
                scope.spawn(move || {
                    samples
                        .iter()
                        .map(|p| model.predict(p).unwrap().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
