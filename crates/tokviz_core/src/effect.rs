use crate::BackendKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Encode `text` with `backend`; the runner answers with `Msg::Tokenized`
    /// carrying the same `revision`.
    Tokenize {
        backend: BackendKind,
        text: String,
        revision: u64,
    },
}
