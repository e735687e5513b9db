use std::path::Path;

use tokenizers::Tokenizer;
use tokviz_core::{BackendError, BackendKind, TokenId, TokenizerBackend};

use crate::EngineError;

/// SentencePiece word-boundary marker.
const WORD_MARKER: char = '\u{2581}';

/// Llama- and Mistral-style vocabularies loaded from a Hugging Face
/// `tokenizer.json`.
pub struct SentencePieceBackend {
    kind: BackendKind,
    tokenizer: Tokenizer,
    add_special_tokens: bool,
}

impl SentencePieceBackend {
    pub fn from_file(
        kind: BackendKind,
        path: &Path,
        add_special_tokens: bool,
    ) -> Result<Self, EngineError> {
        let tokenizer = Tokenizer::from_file(path).map_err(|err| EngineError::Load {
            backend: kind,
            source_name: path.display().to_string(),
            message: err.to_string(),
        })?;
        Ok(Self::new(kind, tokenizer, add_special_tokens))
    }

    pub fn from_bytes(
        kind: BackendKind,
        bytes: &[u8],
        add_special_tokens: bool,
    ) -> Result<Self, EngineError> {
        let tokenizer = Tokenizer::from_bytes(bytes).map_err(|err| EngineError::Load {
            backend: kind,
            source_name: "in-memory tokenizer.json".to_string(),
            message: err.to_string(),
        })?;
        Ok(Self::new(kind, tokenizer, add_special_tokens))
    }

    pub fn new(kind: BackendKind, tokenizer: Tokenizer, add_special_tokens: bool) -> Self {
        Self {
            kind,
            tokenizer,
            add_special_tokens,
        }
    }
}

impl TokenizerBackend for SentencePieceBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn encode(&self, text: &str) -> Result<Vec<TokenId>, BackendError> {
        let encoding = self
            .tokenizer
            .encode(text, self.add_special_tokens)
            .map_err(|err| BackendError::encode(self.kind, err.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Returns the raw vocabulary piece. Going through the tokenizer's decoder
    /// would strip the leading space of a lone piece.
    fn decode_one(&self, id: TokenId) -> Result<String, BackendError> {
        self.tokenizer
            .id_to_token(id)
            .map(|piece| piece.replace(WORD_MARKER, " "))
            .ok_or_else(|| BackendError::decode(self.kind, id, "id not in vocabulary"))
    }
}
