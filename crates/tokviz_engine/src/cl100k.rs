use tiktoken_rs::CoreBPE;
use tokviz_core::{display_bytes, BackendError, BackendKind, TokenId, TokenizerBackend};

use crate::EngineError;

/// Byte-pair encoding with the `cl100k_base` ranks shipped inside `tiktoken-rs`.
pub struct Cl100kBackend {
    bpe: CoreBPE,
    allow_special_tokens: bool,
}

impl Cl100kBackend {
    pub fn new(allow_special_tokens: bool) -> Result<Self, EngineError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|err| EngineError::Load {
            backend: BackendKind::Cl100k,
            source_name: "embedded cl100k_base ranks".to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            bpe,
            allow_special_tokens,
        })
    }
}

impl TokenizerBackend for Cl100kBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cl100k
    }

    fn encode(&self, text: &str) -> Result<Vec<TokenId>, BackendError> {
        // Special-token text is plain text unless explicitly allowed.
        let ranks = if self.allow_special_tokens {
            self.bpe.encode_with_special_tokens(text)
        } else {
            self.bpe.encode_ordinary(text)
        };
        Ok(ranks.into_iter().map(|rank| rank as TokenId).collect())
    }

    fn decode_one(&self, id: TokenId) -> Result<String, BackendError> {
        // A lone token may hold part of a multi-byte character.
        let bytes: Vec<u8> = self
            .bpe
            ._decode_native_and_split(vec![id as _])
            .flatten()
            .collect();
        Ok(display_bytes(&bytes))
    }
}
