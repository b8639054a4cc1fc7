pub mod shell;
pub mod startup;

use std::fs;
use std::path::Path;

use gridmeasure::UiEvent;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use shell::Shell;
pub use startup::{StartupArgs, StartupError};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// A recorded sequence of user actions to replay against an image
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionScript {
    pub events: Vec<UiEvent>,
}

impl SessionScript {
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SessionScript)
    }

    /// Load a script from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a script from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the script
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ScriptError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, ScriptError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}
