use std::path::PathBuf;

use engine_logging::{engine_info, engine_warn};
use tokviz_core::{tokenize, BackendKind, TokenizedText, TokenizerBackend};

use crate::{Cl100kBackend, EngineError, SentencePieceBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub llama_tokenizer: Option<PathBuf>,
    pub mistral_tokenizer: Option<PathBuf>,
    /// Let SentencePiece backends add their sequence sentinels (BOS).
    pub add_special_tokens: bool,
    /// Let cl100k recognise special-token text such as `<|endoftext|>`.
    pub allow_special_tokens: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            llama_tokenizer: None,
            mistral_tokenizer: None,
            add_special_tokens: true,
            allow_special_tokens: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Ready,
    Unavailable(String),
}

/// Owns every loaded backend for the lifetime of the session. Loaded once,
/// read-only afterwards.
#[derive(Default)]
pub struct BackendRegistry {
    loaded: Vec<Box<dyn TokenizerBackend>>,
    unavailable: Vec<(BackendKind, String)>,
}

impl BackendRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads all backends. Failures are recorded, not fatal: the backend is
    /// reported unavailable with the reason.
    pub fn load(settings: &BackendSettings) -> Self {
        let mut registry = Self::empty();

        registry.record(
            BackendKind::Cl100k,
            Cl100kBackend::new(settings.allow_special_tokens)
                .map(|b| Box::new(b) as Box<dyn TokenizerBackend>),
        );

        for (kind, path) in [
            (BackendKind::Llama, &settings.llama_tokenizer),
            (BackendKind::Mistral, &settings.mistral_tokenizer),
        ] {
            let result = match path {
                Some(path) => {
                    SentencePieceBackend::from_file(kind, path, settings.add_special_tokens)
                        .map(|b| Box::new(b) as Box<dyn TokenizerBackend>)
                }
                None => Err(EngineError::Unavailable {
                    backend: kind,
                    reason: "no tokenizer.json configured".to_string(),
                }),
            };
            registry.record(kind, result);
        }

        registry
    }

    pub fn with_backend(mut self, backend: Box<dyn TokenizerBackend>) -> Self {
        let kind = backend.kind();
        self.unavailable.retain(|(k, _)| *k != kind);
        self.loaded.retain(|b| b.kind() != kind);
        self.loaded.push(backend);
        self
    }

    fn record(&mut self, kind: BackendKind, result: Result<Box<dyn TokenizerBackend>, EngineError>) {
        match result {
            Ok(backend) => {
                engine_info!("Loaded tokenizer backend {}", kind);
                self.loaded.push(backend);
            }
            Err(err) => {
                engine_warn!("Tokenizer backend {} unavailable: {}", kind, err);
                let reason = match err {
                    EngineError::Unavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                self.unavailable.push((kind, reason));
            }
        }
    }

    pub fn get(&self, kind: BackendKind) -> Result<&dyn TokenizerBackend, EngineError> {
        if let Some(backend) = self.loaded.iter().find(|b| b.kind() == kind) {
            return Ok(backend.as_ref());
        }
        let reason = self
            .unavailable
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, reason)| reason.clone())
            .unwrap_or_else(|| "not loaded".to_string());
        Err(EngineError::Unavailable {
            backend: kind,
            reason,
        })
    }

    pub fn status(&self, kind: BackendKind) -> BackendStatus {
        match self.get(kind) {
            Ok(_) => BackendStatus::Ready,
            Err(EngineError::Unavailable { reason, .. }) => BackendStatus::Unavailable(reason),
            Err(other) => BackendStatus::Unavailable(other.to_string()),
        }
    }

    /// Encodes and decodes `text` with the backend for `kind`.
    pub fn tokenize(&self, kind: BackendKind, text: &str) -> Result<TokenizedText, EngineError> {
        let backend = self.get(kind)?;
        Ok(tokenize(backend, text)?)
    }
}
