use std::fmt;

use crate::reserved::ReservedTable;

/// Token identifier; only meaningful relative to the backend that produced it.
pub type TokenId = u32;

/// Closed set of tokenizer backends the visualizer can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    #[default]
    Llama,
    Mistral,
    Cl100k,
}

impl BackendKind {
    /// Selector order.
    pub const ALL: [BackendKind; 3] = [BackendKind::Llama, BackendKind::Mistral, BackendKind::Cl100k];

    /// Stable identifier used by the selector, the command line and config files.
    pub fn key(self) -> &'static str {
        match self {
            BackendKind::Llama => "llama",
            BackendKind::Mistral => "mistral",
            BackendKind::Cl100k => "cl100k_base",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Llama => "llamaTokenizer",
            BackendKind::Mistral => "MistralTokenizer",
            BackendKind::Cl100k => "cl100k_base (GPT-3.5-turbo and GPT-4)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Control-token labels this backend reserves.
    pub fn reserved(self) -> &'static ReservedTable {
        ReservedTable::for_backend(self)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{backend} failed to encode input: {message}")]
    Encode {
        backend: BackendKind,
        message: String,
    },
    #[error("{backend} failed to decode token {id}: {message}")]
    Decode {
        backend: BackendKind,
        id: TokenId,
        message: String,
    },
}

impl BackendError {
    pub fn encode(backend: BackendKind, message: impl Into<String>) -> Self {
        Self::Encode {
            backend,
            message: message.into(),
        }
    }

    pub fn decode(backend: BackendKind, id: TokenId, message: impl Into<String>) -> Self {
        Self::Decode {
            backend,
            id,
            message: message.into(),
        }
    }
}

/// Capability every tokenizer backend exposes to the render pipeline.
///
/// Implementations are loaded once and only read afterwards.
pub trait TokenizerBackend {
    fn kind(&self) -> BackendKind;

    /// Encodes `text` into token ids in order. Empty input yields whatever the
    /// underlying library emits for it (nothing, or a lone sentinel).
    fn encode(&self, text: &str) -> Result<Vec<TokenId>, BackendError>;

    /// Decodes a single id in isolation. Batch decoding would merge byte
    /// fragments of neighbouring tokens.
    fn decode_one(&self, id: TokenId) -> Result<String, BackendError>;

    fn reserved(&self) -> &'static ReservedTable {
        self.kind().reserved()
    }
}
