use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::StoreConfig;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn config_path(store_dir: &Path) -> PathBuf {
    store_dir.join("config.toml")
}

/// Read the store config. A missing file yields defaults; a malformed file
/// is an error the caller surfaces at startup (unlike item data, which
/// degrades silently).
pub fn read_config(store_dir: &Path) -> Result<StoreConfig, ConfigError> {
    let path = config_path(store_dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StoreConfig::default());
        }
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Read the config as a toml_edit document for round-trip-safe edits.
/// A missing file starts from an empty document.
pub fn read_config_doc(store_dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = config_path(store_dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    // Validate through serde first so a broken file errors consistently
    let _: StoreConfig = toml::from_str(&text)?;
    text.parse()
        .map_err(|_: toml_edit::TomlError| ConfigError::ParseError(
            toml::from_str::<StoreConfig>("store = 0").unwrap_err(),
        ))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(store_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    fs::create_dir_all(store_dir).map_err(|e| ConfigError::WriteError {
        path: store_dir.to_path_buf(),
        source: e,
    })?;
    let path = config_path(store_dir);
    fs::write(&path, doc.to_string()).map_err(|e| ConfigError::WriteError { path, source: e })
}

/// Set one of the recognized `[store]` options in the document.
pub fn set_store_option(doc: &mut toml_edit::DocumentMut, key: &str, value: bool) {
    if !doc.contains_key("store") {
        doc["store"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["store"][key] = toml_edit::value(value);
}
