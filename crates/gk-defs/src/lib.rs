//! gk-defs: serialized gas-model definition format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_model};

use std::path::Path;

pub type DefinitionResult<T> = Result<T, DefinitionError>;

#[derive(thiserror::Error, Debug)]
pub enum DefinitionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unrecognized model file extension: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a model definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Pick the format from the file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> DefinitionResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(DefinitionError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn from_yaml_str(content: &str) -> DefinitionResult<ModelDef> {
    let model: ModelDef = serde_yaml::from_str(content)?;
    validate_model(&model)?;
    Ok(model)
}

pub fn from_json_str(content: &str) -> DefinitionResult<ModelDef> {
    let model: ModelDef = serde_json::from_str(content)?;
    validate_model(&model)?;
    Ok(model)
}

pub fn load_yaml(path: &Path) -> DefinitionResult<ModelDef> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, model: &ModelDef) -> DefinitionResult<()> {
    validate_model(model)?;
    let content = serde_yaml::to_string(model)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> DefinitionResult<ModelDef> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &Path, model: &ModelDef) -> DefinitionResult<()> {
    validate_model(model)?;
    let content = serde_json::to_string_pretty(model)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a definition, choosing YAML or JSON from the file extension.
pub fn load(path: &Path) -> DefinitionResult<ModelDef> {
    match DefinitionFormat::from_path(path)? {
        DefinitionFormat::Yaml => load_yaml(path),
        DefinitionFormat::Json => load_json(path),
    }
}
