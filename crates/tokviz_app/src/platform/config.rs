use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokviz_core::{BackendKind, DEFAULT_TEXT};
use tokviz_engine::BackendSettings;

use crate::cli::Args;

pub const DEFAULT_CONFIG_FILENAME: &str = "tokviz.ron";
const DEFAULT_LOG_FILENAME: &str = "./tokviz.log";

/// On-disk configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub default_backend: String,
    pub initial_text: String,
    pub llama_tokenizer: Option<PathBuf>,
    pub mistral_tokenizer: Option<PathBuf>,
    pub add_special_tokens: bool,
    pub allow_special_tokens: bool,
    pub log_file: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        let backends = BackendSettings::default();
        Self {
            default_backend: BackendKind::default().key().to_string(),
            initial_text: DEFAULT_TEXT.to_string(),
            llama_tokenizer: backends.llama_tokenizer,
            mistral_tokenizer: backends.mistral_tokenizer,
            add_special_tokens: backends.add_special_tokens,
            allow_special_tokens: backends.allow_special_tokens,
            log_file: PathBuf::from(DEFAULT_LOG_FILENAME),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown backend {0:?} (expected llama, mistral or cl100k_base)")]
    UnknownBackend(String),
}

/// Settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub initial_text: String,
    pub backends: BackendSettings,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn resolve(file: FileConfig, args: &Args) -> Result<Self, ConfigError> {
        let key = args.backend.as_deref().unwrap_or(&file.default_backend);
        let backend =
            BackendKind::from_key(key).ok_or_else(|| ConfigError::UnknownBackend(key.to_string()))?;

        Ok(Self {
            backend,
            initial_text: args.text.clone().unwrap_or(file.initial_text),
            backends: BackendSettings {
                llama_tokenizer: args.llama_tokenizer.clone().or(file.llama_tokenizer),
                mistral_tokenizer: args.mistral_tokenizer.clone().or(file.mistral_tokenizer),
                add_special_tokens: file.add_special_tokens,
                allow_special_tokens: file.allow_special_tokens,
            },
            log_file: args.log_file.clone().unwrap_or(file.log_file),
        })
    }
}

/// Loads the config file. Without an explicit path a missing
/// `./tokviz.ron` means built-in defaults; an explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(FileConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}
