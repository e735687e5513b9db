#![allow(dead_code)]

use std::sync::Once;

use tokviz_core::{
    tokenize, update, AppState, BackendError, BackendKind, Effect, Msg, TokenId, TokenizerBackend,
};

const FIRST_PIECE_ID: TokenId = 300;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Greedy longest-match tokenizer over a fixed vocabulary. Characters outside
/// the vocabulary encode to id 0.
pub struct FakeBackend {
    kind: BackendKind,
    vocab: Vec<&'static str>,
    sentinel: Option<TokenId>,
    fail_on: Option<&'static str>,
}

impl FakeBackend {
    pub fn new(kind: BackendKind, vocab: &[&'static str]) -> Self {
        Self {
            kind,
            vocab: vocab.iter().copied().filter(|p| !p.is_empty()).collect(),
            sentinel: None,
            fail_on: None,
        }
    }

    pub fn with_sentinel(mut self, id: TokenId) -> Self {
        self.sentinel = Some(id);
        self
    }

    pub fn failing_on(mut self, needle: &'static str) -> Self {
        self.fail_on = Some(needle);
        self
    }

    pub fn id_of(&self, piece: &str) -> TokenId {
        let index = self
            .vocab
            .iter()
            .position(|p| *p == piece)
            .expect("piece in vocabulary");
        FIRST_PIECE_ID + index as TokenId
    }
}

impl TokenizerBackend for FakeBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn encode(&self, text: &str) -> Result<Vec<TokenId>, BackendError> {
        if let Some(needle) = self.fail_on {
            if text.contains(needle) {
                return Err(BackendError::encode(self.kind, format!("refusing {needle:?}")));
            }
        }
        let mut ids: Vec<TokenId> = self.sentinel.into_iter().collect();
        let mut rest = text;
        while let Some(ch) = rest.chars().next() {
            let best = self
                .vocab
                .iter()
                .enumerate()
                .filter(|(_, piece)| rest.starts_with(**piece))
                .max_by_key(|(_, piece)| piece.len());
            match best {
                Some((index, piece)) => {
                    ids.push(FIRST_PIECE_ID + index as TokenId);
                    rest = &rest[piece.len()..];
                }
                None => {
                    ids.push(0);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        Ok(ids)
    }

    fn decode_one(&self, id: TokenId) -> Result<String, BackendError> {
        id.checked_sub(FIRST_PIECE_ID)
            .and_then(|index| self.vocab.get(index as usize))
            .map(|piece| piece.to_string())
            .ok_or_else(|| BackendError::decode(self.kind, id, "not a vocabulary piece"))
    }
}

/// Applies a message and runs any resulting effects against `backends`,
/// the way the app's effect runner does.
pub fn dispatch(state: AppState, msg: Msg, backends: &[&dyn TokenizerBackend]) -> AppState {
    let (mut state, effects) = update(state, msg);
    for effect in effects {
        let Effect::Tokenize {
            backend,
            text,
            revision,
        } = effect;
        let result = match backends.iter().find(|b| b.kind() == backend) {
            Some(found) => tokenize(*found, &text).map_err(|err| err.to_string()),
            None => Err(format!("{backend} is not available")),
        };
        state = update(
            state,
            Msg::Tokenized {
                backend,
                revision,
                result,
            },
        )
        .0;
    }
    state
}
