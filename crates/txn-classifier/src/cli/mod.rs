pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, GlobalArgs, PredictArgs};
use txn_classifier::{ModelOrigin, Workflow, DEMO_TEXTS};

#[derive(Parser, Debug)]
#[command(
    name = "txn-classifier",
    version,
    about = "Label transaction descriptions with a multinomial Naive Bayes model."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `demo`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.global.resolve().context("failed to resolve configuration")?;
        let workflow = Workflow::new(config).context("invalid configuration")?;

        match self.command.unwrap_or(Commands::Demo) {
            Commands::Demo => run_demo(&workflow),
            Commands::Train => run_train(&workflow),
            Commands::Predict(args) => run_predict(&workflow, args),
            Commands::Evaluate => run_evaluate(&workflow),
        }
    }
}

fn load_or_train(workflow: &Workflow) -> Result<txn_classifier::TrainedModel> {
    let model_path = &workflow.config().model_path;
    let (model, origin) = workflow
        .load_or_train()
        .with_context(|| format!("failed to prepare model {}", model_path.display()))?;
    match origin {
        ModelOrigin::Loaded => tracing::info!("Model successfully loaded: {}", model_path.display()),
        ModelOrigin::Trained => tracing::info!("Saved model: {}", model_path.display()),
    }
    Ok(model)
}

fn run_demo(workflow: &Workflow) -> Result<()> {
    let model = load_or_train(workflow)?;

    for text in DEMO_TEXTS {
        let label = model.predict(text)?;
        tracing::info!("text '{text}' is {label}");
    }

    let evaluation = workflow
        .evaluate(&model, None)
        .context("evaluation failed")?;
    tracing::info!("Evaluation Result:\n{evaluation}");
    Ok(())
}

fn run_train(workflow: &Workflow) -> Result<()> {
    let config = workflow.config();
    workflow
        .retrain()
        .with_context(|| format!("failed to train from {}", config.train_path.display()))?;
    println!("Saved model: {}", config.model_path.display());
    Ok(())
}

fn run_predict(workflow: &Workflow, args: PredictArgs) -> Result<()> {
    let model = load_or_train(workflow)?;
    let labels = model.predict_batch(args.texts.iter().map(String::as_str))?;
    for (text, label) in args.texts.iter().zip(labels) {
        println!("{label}\t{text}");
    }
    Ok(())
}

fn run_evaluate(workflow: &Workflow) -> Result<()> {
    let model = load_or_train(workflow)?;
    let evaluation = workflow
        .evaluate(&model, None)
        .context("evaluation failed")?;
    println!("{evaluation}");
    Ok(())
}
