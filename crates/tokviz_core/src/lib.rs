//! Tokviz core: tokenizer capability trait, token classification, rendering,
//! and the pure input-controller state machine.
mod backend;
mod classify;
mod effect;
mod msg;
mod pipeline;
mod render;
mod reserved;
mod state;
mod stats;
mod update;
mod view_model;

pub use backend::{BackendError, BackendKind, TokenId, TokenizerBackend};
pub use classify::{classify_piece, classify_pieces, RenderableUnit};
pub use effect::Effect;
pub use msg::Msg;
pub use pipeline::{tokenize, TokenizedText};
pub use render::{
    color_for, decoded_view, encoded_view, ColoredSpan, DecodedLine, PastelColor, IDS_PER_LINE,
    PALETTE,
};
pub use reserved::{byte_label, display_bytes, ReservedTable};
pub use state::{AppState, Rendition, ViewMode, DEFAULT_TEXT};
pub use stats::{character_count, Statistics};
pub use update::update;
pub use view_model::{AppViewModel, OutputView};
