/// Smallest unit the renderer places on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderableUnit {
    /// Literal text of one token. `token_index` is the position of the source
    /// token in the encoded sequence and drives color assignment.
    TextSpan { content: String, token_index: usize },
    LineBreak,
}

impl RenderableUnit {
    pub fn span(content: impl Into<String>, token_index: usize) -> Self {
        Self::TextSpan {
            content: content.into(),
            token_index,
        }
    }
}

/// Pieces that stand for a line break on their own.
const NEWLINE_MARKERS: [&str; 3] = ["\n", "<0x0A>", "<newline>"];

/// Turns the display string of one token into renderable units, in order.
///
/// Never drops non-whitespace content: a piece embedding `\n` is split into
/// spans with a `LineBreak` between neighbouring segments.
pub fn classify_piece(token_index: usize, piece: &str) -> Vec<RenderableUnit> {
    if NEWLINE_MARKERS.contains(&piece) {
        return vec![RenderableUnit::LineBreak];
    }
    if !piece.contains('\n') {
        return vec![RenderableUnit::span(piece, token_index)];
    }

    let mut units = Vec::new();
    for (i, segment) in piece.split('\n').enumerate() {
        if i > 0 {
            units.push(RenderableUnit::LineBreak);
        }
        let segment = segment.strip_suffix('\r').unwrap_or(segment);
        if !segment.is_empty() {
            units.push(RenderableUnit::span(segment, token_index));
        }
    }
    units
}

/// Classifies a whole token sequence, preserving encode order.
pub fn classify_pieces<S: AsRef<str>>(pieces: &[S]) -> Vec<RenderableUnit> {
    pieces
        .iter()
        .enumerate()
        .flat_map(|(index, piece)| classify_piece(index, piece.as_ref()))
        .collect()
}
