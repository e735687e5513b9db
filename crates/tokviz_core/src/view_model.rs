use crate::{BackendKind, DecodedLine, Statistics, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    /// Nothing has been tokenized successfully yet.
    Empty,
    Decoded(Vec<DecodedLine>),
    Encoded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub text: String,
    pub backend: BackendKind,
    pub view_mode: ViewMode,
    pub output: OutputView,
    pub stats: Statistics,
    pub error: Option<String>,
    pub dirty: bool,
}
