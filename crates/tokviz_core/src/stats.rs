/// Counts shown under the output pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    pub characters: usize,
    pub tokens: usize,
}

impl Statistics {
    pub fn new(text: &str, tokens: usize) -> Self {
        Self {
            characters: character_count(text),
            tokens,
        }
    }
}

/// Length in UTF-16 code units, the unit browser text inputs report.
pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}
