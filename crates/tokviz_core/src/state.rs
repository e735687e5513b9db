use engine_logging::{engine_debug, engine_warn};

use crate::view_model::{AppViewModel, OutputView};
use crate::{
    character_count, decoded_view, encoded_view, BackendKind, Effect, Statistics, TokenizedText,
};

pub const DEFAULT_TEXT: &str =
    "Welcome to tokenizer. Replace this with your text to see how tokenization works.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Decoded,
    Encoded,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Decoded => ViewMode::Encoded,
            ViewMode::Encoded => ViewMode::Decoded,
        }
    }

    /// Caption of the control that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::Decoded => "Show Token IDs",
            ViewMode::Encoded => "Show tokenized text",
        }
    }
}

/// Last successful encode together with the text it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub text: String,
    pub tokenized: TokenizedText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    text: String,
    backend: BackendKind,
    view_mode: ViewMode,
    revision: u64,
    rendition: Option<Rendition>,
    last_error: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_input(DEFAULT_TEXT, BackendKind::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(text: impl Into<String>, backend: BackendKind) -> Self {
        Self {
            text: text.into(),
            backend,
            view_mode: ViewMode::default(),
            revision: 0,
            rendition: None,
            last_error: None,
            dirty: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rendition(&self) -> Option<&Rendition> {
        self.rendition.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Builds the view model. Pure: the same state always yields the same view.
    pub fn view(&self) -> AppViewModel {
        let (output, stats) = match &self.rendition {
            Some(rendition) => {
                let tokenized = &rendition.tokenized;
                let output = match self.view_mode {
                    ViewMode::Decoded => OutputView::Decoded(decoded_view(&tokenized.units())),
                    ViewMode::Encoded => OutputView::Encoded(encoded_view(&tokenized.ids)),
                };
                (
                    output,
                    Statistics::new(&rendition.text, tokenized.token_count()),
                )
            }
            None => (OutputView::Empty, Statistics::new(&self.text, 0)),
        };

        AppViewModel {
            text: self.text.clone(),
            backend: self.backend,
            view_mode: self.view_mode,
            output,
            stats,
            error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.dirty = true;
    }

    pub(crate) fn select_backend(&mut self, backend: BackendKind) {
        self.backend = backend;
        self.dirty = true;
    }

    pub(crate) fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
        self.dirty = true;
    }

    /// Starts a new recompute; results for earlier revisions become stale.
    pub(crate) fn request_tokenize(&mut self) -> Effect {
        self.revision += 1;
        engine_debug!(
            "Tokenize requested backend={} revision={} chars={}",
            self.backend,
            self.revision,
            character_count(&self.text)
        );
        Effect::Tokenize {
            backend: self.backend,
            text: self.text.clone(),
            revision: self.revision,
        }
    }

    pub(crate) fn apply_tokenized(
        &mut self,
        backend: BackendKind,
        revision: u64,
        result: Result<TokenizedText, String>,
    ) {
        if revision != self.revision || backend != self.backend {
            engine_debug!(
                "Dropping stale result backend={} revision={} (current {} / {})",
                backend,
                revision,
                self.backend,
                self.revision
            );
            return;
        }

        match result {
            Ok(tokenized) => {
                self.rendition = Some(Rendition {
                    text: self.text.clone(),
                    tokenized,
                });
                self.last_error = None;
            }
            Err(message) => {
                engine_warn!("Tokenize failed backend={}: {}", backend, message);
                // Never show one backend's ids under another backend's name.
                if let Some(previous) = self.rendition.as_ref().map(|r| r.tokenized.backend) {
                    if previous != self.backend {
                        self.backend = previous;
                    }
                }
                self.last_error = Some(message);
            }
        }
        self.dirty = true;
    }
}
