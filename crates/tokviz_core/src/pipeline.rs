use engine_logging::engine_debug;

use crate::classify::{classify_pieces, RenderableUnit};
use crate::{character_count, BackendError, BackendKind, TokenId, TokenizerBackend};

/// Encode result for one (text, backend) pair: the raw ids and the display
/// string of every id, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    pub backend: BackendKind,
    pub ids: Vec<TokenId>,
    pub pieces: Vec<String>,
}

impl TokenizedText {
    pub fn token_count(&self) -> usize {
        self.ids.len()
    }

    pub fn units(&self) -> Vec<RenderableUnit> {
        classify_pieces(&self.pieces)
    }
}

/// Runs encode and per-token decode against `backend`.
///
/// Reserved ids take their label from the backend's table and never reach
/// `decode_one`. Any failure aborts the whole pass.
pub fn tokenize(backend: &dyn TokenizerBackend, text: &str) -> Result<TokenizedText, BackendError> {
    let ids = backend.encode(text)?;
    let reserved = backend.reserved();
    let pieces = ids
        .iter()
        .map(|&id| match reserved.label(id) {
            Some(label) => Ok(label.into_owned()),
            None => backend.decode_one(id),
        })
        .collect::<Result<Vec<_>, _>>()?;

    engine_debug!(
        "tokenized backend={} chars={} tokens={}",
        backend.kind(),
        character_count(text),
        ids.len()
    );

    Ok(TokenizedText {
        backend: backend.kind(),
        ids,
        pieces,
    })
}
