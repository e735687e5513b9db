use crate::{BackendKind, TokenizedText};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input box; carries the full new text.
    TextEdited(String),
    /// User clicked Clear.
    ClearClicked,
    /// User picked a backend from the selector, by key.
    BackendSelected(String),
    /// User flipped between decoded and encoded views.
    ToggleViewClicked,
    /// Recompute from the current text and backend (startup).
    Refresh,
    /// Result of an `Effect::Tokenize`.
    Tokenized {
        backend: BackendKind,
        revision: u64,
        result: Result<TokenizedText, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
