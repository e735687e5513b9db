mod common;

use common::{dispatch, init_logging, FakeBackend};
use pretty_assertions::assert_eq;
use tokviz_core::{
    update, AppState, BackendKind, Effect, Msg, OutputView, TokenizedText, TokenizerBackend,
    ViewMode, DEFAULT_TEXT,
};

const VOCAB: &[&str] = &["Hello", " world", "world", "\n", " ", "a", "b", "c"];

fn llama() -> FakeBackend {
    FakeBackend::new(BackendKind::Llama, VOCAB).with_sentinel(1)
}

fn cl100k() -> FakeBackend {
    // Single characters only, so ids differ from the llama fake.
    FakeBackend::new(BackendKind::Cl100k, &["H", "e", "l", "o", " ", "w", "r", "d", "\n", "a", "b", "c"])
}

fn started(text: &str, backends: &[&dyn TokenizerBackend]) -> AppState {
    let state = AppState::with_input(text, BackendKind::Llama);
    dispatch(state, Msg::Refresh, backends)
}

fn ids(state: &AppState) -> Vec<u32> {
    state.rendition().unwrap().tokenized.ids.clone()
}

#[test]
fn default_state_uses_welcome_text_and_llama() {
    let state = AppState::new();
    assert_eq!(state.text(), DEFAULT_TEXT);
    assert_eq!(state.backend(), BackendKind::Llama);
    assert_eq!(state.view_mode(), ViewMode::Decoded);
    assert_eq!(state.view().output, OutputView::Empty);
}

#[test]
fn text_edit_requests_tokenize_with_new_revision() {
    init_logging();
    let state = AppState::with_input("a", BackendKind::Llama);
    let (state, effects) = update(state, Msg::TextEdited("ab".to_string()));

    assert_eq!(
        effects,
        vec![Effect::Tokenize {
            backend: BackendKind::Llama,
            text: "ab".to_string(),
            revision: 1,
        }]
    );
    assert!(state.view().dirty);
}

#[test]
fn identical_edit_emits_nothing() {
    init_logging();
    let state = AppState::with_input("abc", BackendKind::Llama);
    let (_state, effects) = update(state, Msg::TextEdited("abc".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn edit_updates_statistics() {
    init_logging();
    let llama = llama();
    let state = started("Hello world", &[&llama]);
    let view = state.view();
    assert_eq!(view.stats.characters, 11);
    assert_eq!(view.stats.tokens, 3);

    let state = dispatch(state, Msg::TextEdited("Hello\nworld".to_string()), &[&llama]);
    let view = state.view();
    assert_eq!(view.stats.characters, 11);
    assert_eq!(view.stats.tokens, 4);
    match view.output {
        OutputView::Decoded(lines) => assert_eq!(lines.len(), 2),
        other => panic!("unexpected output {other:?}"),
    }
}

#[test]
fn clear_resets_text_and_counts_sentinel() {
    init_logging();
    let llama = llama();
    let state = started("Hello", &[&llama]);
    let state = dispatch(state, Msg::ClearClicked, &[&llama]);

    let view = state.view();
    assert_eq!(view.text, "");
    assert_eq!(view.stats.characters, 0);
    assert_eq!(view.stats.tokens, 1);
}

#[test]
fn clear_on_empty_text_is_noop() {
    init_logging();
    let state = AppState::with_input("", BackendKind::Cl100k);
    let (_state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.is_empty());
}

#[test]
fn empty_input_without_sentinel_has_zero_tokens() {
    init_logging();
    let cl100k = cl100k();
    let state = AppState::with_input("", BackendKind::Cl100k);
    let state = dispatch(state, Msg::Refresh, &[&cl100k]);
    assert_eq!(state.view().stats.tokens, 0);
    assert_eq!(state.view().stats.characters, 0);
}

#[test]
fn toggle_view_keeps_statistics() {
    init_logging();
    let llama = llama();
    let state = started("Hello world", &[&llama]);
    let before = state.view().stats;

    let (state, effects) = update(state, Msg::ToggleViewClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.view_mode, ViewMode::Encoded);
    assert_eq!(view.stats, before);
    assert_eq!(
        view.output,
        OutputView::Encoded(format!(
            "[\n  1, {}, {}\n]",
            llama.id_of("Hello"),
            llama.id_of(" world")
        ))
    );

    let (state, _) = update(state, Msg::ToggleViewClicked);
    assert_eq!(state.view_mode(), ViewMode::Decoded);
    assert_eq!(state.view().stats, before);
}

#[test]
fn backend_switch_recomputes_from_scratch() {
    init_logging();
    let llama = llama();
    let cl100k = cl100k();
    let backends: [&dyn TokenizerBackend; 2] = [&llama, &cl100k];

    let state = started("Hello world", &backends);
    let llama_ids = ids(&state);

    let (state, effects) = update(state, Msg::BackendSelected("cl100k_base".to_string()));
    assert_eq!(
        effects,
        vec![Effect::Tokenize {
            backend: BackendKind::Cl100k,
            text: "Hello world".to_string(),
            revision: 2,
        }]
    );

    // Nothing from the old backend survives once the new result lands.
    let state = dispatch(state, Msg::Refresh, &backends);
    assert_eq!(state.rendition().unwrap().tokenized.backend, BackendKind::Cl100k);
    assert_ne!(ids(&state), llama_ids);
    assert_eq!(state.view().stats.tokens, 11);
}

#[test]
fn selecting_current_backend_is_noop() {
    init_logging();
    let state = AppState::with_input("x", BackendKind::Mistral);
    let (_state, effects) = update(state, Msg::BackendSelected("mistral".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn stale_results_are_dropped() {
    init_logging();
    let state = AppState::with_input("a", BackendKind::Cl100k);
    let (state, _) = update(state, Msg::TextEdited("ab".to_string()));
    let (state, _) = update(state, Msg::TextEdited("abc".to_string()));
    assert_eq!(state.revision(), 2);

    let stale = TokenizedText {
        backend: BackendKind::Cl100k,
        ids: vec![9, 9],
        pieces: vec!["a".into(), "b".into()],
    };
    let (state, _) = update(
        state,
        Msg::Tokenized {
            backend: BackendKind::Cl100k,
            revision: 1,
            result: Ok(stale),
        },
    );
    assert!(state.rendition().is_none());
}

#[test]
fn results_for_other_backend_are_dropped() {
    init_logging();
    let state = AppState::with_input("a", BackendKind::Cl100k);
    let (state, _) = update(state, Msg::Refresh);
    let foreign = TokenizedText {
        backend: BackendKind::Llama,
        ids: vec![1],
        pieces: vec!["<s>".into()],
    };
    let (state, _) = update(
        state,
        Msg::Tokenized {
            backend: BackendKind::Llama,
            revision: 1,
            result: Ok(foreign),
        },
    );
    assert!(state.rendition().is_none());
}

#[test]
fn encode_failure_keeps_previous_render() {
    init_logging();
    let llama = llama().failing_on("c");
    let state = started("ab", &[&llama]);
    let before = state.view();

    let state = dispatch(state, Msg::TextEdited("abc".to_string()), &[&llama]);
    let view = state.view();

    assert_eq!(view.text, "abc");
    assert_eq!(view.output, before.output);
    assert_eq!(view.stats, before.stats);
    assert!(view.error.as_deref().unwrap().contains("refusing"));

    // The next good edit clears the error.
    let state = dispatch(state, Msg::TextEdited("ba".to_string()), &[&llama]);
    assert_eq!(state.view().error, None);
    assert_eq!(state.view().stats.tokens, 3);
}

#[test]
fn unavailable_backend_falls_back_to_previous_selection() {
    init_logging();
    let llama = llama();
    let state = started("Hello", &[&llama]);

    let state = dispatch(state, Msg::BackendSelected("mistral".to_string()), &[&llama]);

    assert_eq!(state.backend(), BackendKind::Llama);
    assert_eq!(state.rendition().unwrap().tokenized.backend, BackendKind::Llama);
    assert!(state.last_error().unwrap().contains("mistral"));
}

#[test]
fn render_is_idempotent() {
    init_logging();
    let llama = llama();
    let state = started("Hello world\nabc", &[&llama]);
    assert_eq!(state.view(), state.view());
}

#[test]
fn consume_dirty_resets_flag() {
    init_logging();
    let state = AppState::with_input("a", BackendKind::Llama);
    let (mut state, _) = update(state, Msg::ToggleViewClicked);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "unknown backend key")]
fn unknown_backend_key_panics_in_debug() {
    let state = AppState::new();
    let _ = update(state, Msg::BackendSelected("gpt2".to_string()));
}

#[cfg(not(debug_assertions))]
#[test]
fn unknown_backend_key_is_ignored_in_release() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::BackendSelected("gpt2".to_string()));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
