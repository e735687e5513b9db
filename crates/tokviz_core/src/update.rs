use engine_logging::engine_warn;

use crate::{AppState, BackendKind, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(text) => {
            if text == state.text() {
                return (state, Vec::new());
            }
            state.set_text(text);
            vec![state.request_tokenize()]
        }
        Msg::ClearClicked => {
            if state.text().is_empty() {
                return (state, Vec::new());
            }
            state.set_text(String::new());
            vec![state.request_tokenize()]
        }
        Msg::BackendSelected(key) => match BackendKind::from_key(&key) {
            Some(kind) if kind == state.backend() => Vec::new(),
            Some(kind) => {
                // Full recompute from scratch; nothing carries over between backends.
                state.select_backend(kind);
                vec![state.request_tokenize()]
            }
            None => {
                debug_assert!(false, "unknown backend key {key:?}");
                engine_warn!("Ignoring unknown backend key {:?}", key);
                Vec::new()
            }
        },
        Msg::ToggleViewClicked => {
            state.toggle_view_mode();
            Vec::new()
        }
        Msg::Refresh => vec![state.request_tokenize()],
        Msg::Tokenized {
            backend,
            revision,
            result,
        } => {
            state.apply_tokenized(backend, revision, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
