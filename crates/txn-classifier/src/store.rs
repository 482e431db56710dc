use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ClassifierError, Result, TrainedModel};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ModelFileRef<'a> {
    format_version: u32,
    model: &'a TrainedModel,
}

#[derive(Deserialize)]
struct ModelFile {
    format_version: u32,
    model: Value,
}

/// Writes `model` to `path`, creating parent directories as needed.
pub fn save<P: AsRef<Path>>(model: &TrainedModel, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ClassifierError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| ClassifierError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let record = ModelFileRef {
        format_version: FORMAT_VERSION,
        model,
    };
    serde_json::to_writer(&mut writer, &record)
        .map_err(|e| ClassifierError::Serialization(e.to_string()))?;
    writer.flush().map_err(|e| ClassifierError::io(path, e))?;

    tracing::info!(path = %path.display(), "saved model");
    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ClassifierError::io(path, e))?;

    let record: ModelFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ClassifierError::Serialization(format!("{}: {e}", path.display()))
    })?;
    if record.format_version != FORMAT_VERSION {
        return Err(ClassifierError::Serialization(format!(
            "{}: unsupported model format version {} (expected {FORMAT_VERSION})",
            path.display(),
            record.format_version
        )));
    }
    check_fitted(&record.model)
        .map_err(|e| ClassifierError::Serialization(format!("{}: {e}", path.display())))?;
    let model: TrainedModel = serde_json::from_value(record.model).map_err(|e| {
        ClassifierError::Serialization(format!("{}: {e}", path.display()))
    })?;
    model
        .check_consistency()
        .map_err(|e| ClassifierError::Serialization(format!("{}: {e}", path.display())))?;

    tracing::info!(path = %path.display(), labels = %model.labels(), "loaded model");
    Ok(model)
}

/// The classifier's accessors assume a fitted distribution, and its priors
/// are only reachable through the serialized form.
fn check_fitted(model: &Value) -> std::result::Result<(), String> {
    let distribution = model
        .pointer("/classifier/inner/distribution")
        .filter(|v| !v.is_null())
        .ok_or("classifier was never fitted")?;
    let classes = distribution["class_labels"].as_array().map(Vec::len);
    let priors = distribution["class_priors"].as_array().map(Vec::len);
    match (classes, priors) {
        (Some(classes), Some(priors)) if classes == priors => Ok(()),
        _ => Err("class priors do not match the class labels".to_string()),
    }
}
