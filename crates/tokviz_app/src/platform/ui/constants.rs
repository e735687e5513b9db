use std::time::Duration;

/// How long the event loop waits for input before emitting a tick.
pub const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub const TITLE_SELECTOR: &str = " Encoder ";
pub const TITLE_INPUT: &str = " Text ";
pub const TITLE_OUTPUT: &str = " Tokens ";
pub const INPUT_PLACEHOLDER: &str = "Enter text...";
pub const KEY_HINTS: &str =
    "[Tab] next encoder  [Shift-Tab] previous  [F2] toggle view  [Ctrl-L] clear  [Esc] quit";
