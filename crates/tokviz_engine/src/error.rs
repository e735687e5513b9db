use tokviz_core::{BackendError, BackendKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{backend} is not available: {reason}")]
    Unavailable { backend: BackendKind, reason: String },
    #[error("failed to load {backend} tokenizer from {source_name}: {message}")]
    Load {
        backend: BackendKind,
        source_name: String,
        message: String,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}
