//! TOML settings file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load a TOML file into `T`.
///
/// A missing file yields the result of deserializing an empty document, so
/// `T` should carry `#[serde(default)]` on every field. When `required` is
/// set a missing file is an error instead.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing required file,
/// [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Invalid`] if it is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path, required: bool) -> Result<T, ConfigError> {
    if !path.exists() {
        if required {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        return parse(path, "");
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(path, &content)
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}
