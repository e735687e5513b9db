use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub selector: Rect,
    pub input: Rect,
    pub output: Rect,
    pub statistics: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> AppLayout {
    let [selector, input, output, statistics, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(30),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    AppLayout {
        selector,
        input,
        output,
        statistics,
        status,
    }
}
