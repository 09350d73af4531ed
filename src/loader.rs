//! Loading of the structure and config models from their JSON documents.

use crate::error::{Error, Result};
use crate::model::{ConfigModel, StructureModel};
use log::debug;
use serde_json::Value;
use std::path::Path;

fn read_root_object(path: &Path) -> Result<Value> {
    debug!("Loading model from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::ModelError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_root_object(&content).map_err(|reason| Error::ModelError {
        path: path.display().to_string(),
        reason,
    })
}

fn parse_root_object(content: &str) -> std::result::Result<Value, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("the document root must be a JSON object".to_string());
    }
    Ok(value)
}

/// Parses a structure model from JSON text.
///
/// # Errors
/// * `Error::ModelError` if the text is not JSON or its root is not an object
pub fn parse_structure_model(content: &str) -> Result<StructureModel> {
    parse_root_object(content)
        .map(|value| StructureModel::from_value(&value))
        .map_err(|reason| Error::ModelError { path: "<inline>".to_string(), reason })
}

/// Parses a config model from JSON text.
///
/// # Errors
/// * `Error::ModelError` if the text is not JSON or its root is not an object
pub fn parse_config_model(content: &str) -> Result<ConfigModel> {
    parse_root_object(content)
        .map(|value| ConfigModel::from_value(&value))
        .map_err(|reason| Error::ModelError { path: "<inline>".to_string(), reason })
}

/// Reads the structure model file.
pub fn load_structure_model<P: AsRef<Path>>(path: P) -> Result<StructureModel> {
    read_root_object(path.as_ref()).map(|value| StructureModel::from_value(&value))
}

/// Reads the config model file.
pub fn load_config_model<P: AsRef<Path>>(path: P) -> Result<ConfigModel> {
    read_root_object(path.as_ref()).map(|value| ConfigModel::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classify, Kind};

    #[test]
    fn test_parse_structure_model() {
        let model = parse_structure_model(r#"{"id": "int", "items": [{"name": "char*"}]}"#).unwrap();
        assert_eq!(model.kind(), Kind::Object);
        assert_eq!(model.fields().unwrap().len(), 2);
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = parse_config_model("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("root must be a JSON object"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_structure_model("/definitely/not/here.json").unwrap_err();
        match err {
            Error::ModelError { path, .. } => assert_eq!(path, "/definitely/not/here.json"),
            other => panic!("Expected ModelError, got {other:?}"),
        }
    }
}
