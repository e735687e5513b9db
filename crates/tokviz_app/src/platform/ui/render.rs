use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tokviz_core::{AppViewModel, BackendKind, DecodedLine, OutputView, PastelColor};

use super::constants::*;
use super::layout;

/// Selector entry; unavailable backends stay selectable but are dimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTab {
    pub kind: BackendKind,
    pub ready: bool,
}

pub fn draw(frame: &mut Frame, view: &AppViewModel, tabs: &[BackendTab]) {
    let areas = layout::split(frame.area());

    frame.render_widget(selector(view, tabs), areas.selector);
    frame.render_widget(input(view), areas.input);
    frame.render_widget(output(view), areas.output);
    frame.render_widget(statistics(view), areas.statistics);
    frame.render_widget(status_line(view), areas.status);
}

fn selector(view: &AppViewModel, tabs: &[BackendTab]) -> Tabs<'static> {
    let titles = tabs.iter().map(|tab| {
        let line = Line::from(tab.kind.label());
        if tab.ready {
            line
        } else {
            line.style(Style::default().fg(Color::DarkGray))
        }
    });
    Tabs::new(titles)
        .select(view.backend.position())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(TITLE_SELECTOR))
}

fn input(view: &AppViewModel) -> Paragraph<'_> {
    let text = if view.text.is_empty() {
        Text::from(INPUT_PLACEHOLDER.dark_gray())
    } else {
        Text::raw(view.text.as_str())
    };
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(TITLE_INPUT))
}

fn output(view: &AppViewModel) -> Paragraph<'_> {
    let text = match &view.output {
        OutputView::Empty => Text::default(),
        OutputView::Decoded(lines) => Text::from(lines.iter().map(decoded_line).collect::<Vec<_>>()),
        OutputView::Encoded(ids) => Text::raw(ids.as_str()),
    };
    let title = format!(
        "{TITLE_OUTPUT}[F2] {} ",
        view.view_mode.toggle_label()
    );
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn decoded_line(line: &DecodedLine) -> Line<'_> {
    Line::from(
        line.iter()
            .map(|span| {
                Span::styled(
                    span.content.as_str(),
                    Style::default().fg(Color::Black).bg(to_color(span.color)),
                )
            })
            .collect::<Vec<_>>(),
    )
}

fn to_color(color: PastelColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn statistics(view: &AppViewModel) -> Paragraph<'static> {
    let line = Line::from(vec![
        "Characters ".bold(),
        Span::raw(format_with_commas(view.stats.characters as u64)),
        "    Tokens ".bold(),
        Span::raw(format_with_commas(view.stats.tokens as u64)),
    ]);
    Paragraph::new(line).block(Block::default().borders(Borders::ALL))
}

fn status_line(view: &AppViewModel) -> Paragraph<'static> {
    match &view.error {
        Some(error) => Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red))),
        None => Paragraph::new(KEY_HINTS.dark_gray()),
    }
}

pub fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
