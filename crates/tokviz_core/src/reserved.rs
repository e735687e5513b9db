use std::borrow::Cow;

use crate::{BackendKind, TokenId};

/// Per-backend table of ids rendered from fixed labels instead of the
/// backend's generic decode path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedTable {
    /// Fixed labels. Checked before the byte-fallback range.
    specials: &'static [(TokenId, &'static str)],
    /// First id of a 256-entry `<0xNN>` byte-fallback block, if the vocabulary has one.
    byte_fallback_start: Option<TokenId>,
}

static LLAMA: ReservedTable = ReservedTable {
    specials: &[(0, "<unk>"), (1, "<s>"), (2, "</s>")],
    byte_fallback_start: Some(3),
};

static MISTRAL: ReservedTable = ReservedTable {
    specials: &[(0, "<unk>"), (1, "<s>"), (2, "</s>"), (13, "<newline>")],
    byte_fallback_start: Some(3),
};

static CL100K: ReservedTable = ReservedTable {
    specials: &[
        (100257, "<|endoftext|>"),
        (100258, "<|fim_prefix|>"),
        (100259, "<|fim_middle|>"),
        (100260, "<|fim_suffix|>"),
        (100276, "<|endofprompt|>"),
    ],
    byte_fallback_start: None,
};

impl ReservedTable {
    pub fn for_backend(kind: BackendKind) -> &'static ReservedTable {
        match kind {
            BackendKind::Llama => &LLAMA,
            BackendKind::Mistral => &MISTRAL,
            BackendKind::Cl100k => &CL100K,
        }
    }

    pub fn label(&self, id: TokenId) -> Option<Cow<'static, str>> {
        if let Some((_, label)) = self.specials.iter().find(|(special, _)| *special == id) {
            return Some(Cow::Borrowed(label));
        }
        let start = self.byte_fallback_start?;
        let offset = id.checked_sub(start)?;
        let byte = u8::try_from(offset).ok()?;
        Some(Cow::Owned(byte_label(byte)))
    }

    pub fn is_reserved(&self, id: TokenId) -> bool {
        self.label(id).is_some()
    }
}

/// `<0xNN>` label for a raw byte, the same form byte-fallback ids render as.
pub fn byte_label(byte: u8) -> String {
    format!("<0x{byte:02X}>")
}

/// Display text for the raw bytes of one token: valid UTF-8 is kept as is,
/// every byte of an incomplete or invalid sequence becomes a `<0xNN>` label.
pub fn display_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for &byte in chunk.invalid() {
            out.push_str(&byte_label(byte));
        }
    }
    out
}
