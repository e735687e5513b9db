//! Tokviz engine: concrete tokenizer backends and the registry that owns them.
mod cl100k;
mod error;
mod registry;
mod sentencepiece;

pub use cl100k::Cl100kBackend;
pub use error::EngineError;
pub use registry::{BackendRegistry, BackendSettings, BackendStatus};
pub use sentencepiece::SentencePieceBackend;
