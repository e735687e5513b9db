use std::fmt::Write;

use crate::classify::RenderableUnit;
use crate::TokenId;

/// Number of ids per visual line in the encoded view.
pub const IDS_PER_LINE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PastelColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background colors cycled over token positions, already blended onto white.
pub const PALETTE: [PastelColor; 5] = [
    PastelColor::rgb(211, 198, 243),
    PastelColor::rgb(195, 242, 202),
    PastelColor::rgb(251, 222, 175),
    PastelColor::rgb(249, 179, 181),
    PastelColor::rgb(169, 225, 247),
];

pub fn color_for(token_index: usize) -> PastelColor {
    PALETTE[token_index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredSpan {
    pub content: String,
    pub token_index: usize,
    pub color: PastelColor,
}

/// One visual line of the decoded view.
pub type DecodedLine = Vec<ColoredSpan>;

/// Lays renderable units out as lines of colored spans.
///
/// Always returns at least one (possibly empty) line; every `LineBreak`
/// starts a new one.
pub fn decoded_view(units: &[RenderableUnit]) -> Vec<DecodedLine> {
    let mut lines = vec![DecodedLine::new()];
    for unit in units {
        match unit {
            RenderableUnit::TextSpan {
                content,
                token_index,
            } => {
                if let Some(line) = lines.last_mut() {
                    line.push(ColoredSpan {
                        content: content.clone(),
                        token_index: *token_index,
                        color: color_for(*token_index),
                    });
                }
            }
            RenderableUnit::LineBreak => lines.push(DecodedLine::new()),
        }
    }
    lines
}

/// Formats ids as an indented bracketed list, ten per line.
pub fn encoded_view(ids: &[TokenId]) -> String {
    let mut out = String::from("[\n  ");
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            if i % IDS_PER_LINE == 0 {
                out.push_str(",\n  ");
            } else {
                out.push_str(", ");
            }
        }
        let _ = write!(out, "{id}");
    }
    out.push_str("\n]");
    out
}
