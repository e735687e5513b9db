use std::collections::VecDeque;
use std::io::Write;

use anyhow::anyhow;
use crossterm::style::{Color, Stylize};
use tokviz_core::{update, AppState, AppViewModel, Msg, OutputView};
use tokviz_engine::BackendRegistry;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::render::format_with_commas;

/// Tokenizes `text` once and writes the chosen view plus statistics to `out`.
pub fn run(config: &AppConfig, text: &str, ids: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let runner = EffectRunner::new(BackendRegistry::load(&config.backends));
    let view = render_once(&runner, config, text, ids)?;
    write_view(&view, out)
}

fn render_once(
    runner: &EffectRunner,
    config: &AppConfig,
    text: &str,
    ids: bool,
) -> anyhow::Result<AppViewModel> {
    let mut state = AppState::with_input(text, config.backend);
    let mut inbox = VecDeque::from([Msg::Refresh]);
    if ids {
        inbox.push_back(Msg::ToggleViewClicked);
    }
    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        inbox.extend(runner.run(effects));
    }

    let view = state.view();
    match &view.error {
        Some(error) => Err(anyhow!("{error}")),
        None => Ok(view),
    }
}

fn write_view(view: &AppViewModel, out: &mut impl Write) -> anyhow::Result<()> {
    match &view.output {
        OutputView::Empty => {}
        OutputView::Encoded(ids) => writeln!(out, "{ids}")?,
        OutputView::Decoded(lines) => {
            for line in lines {
                for span in line {
                    let bg = Color::Rgb {
                        r: span.color.r,
                        g: span.color.g,
                        b: span.color.b,
                    };
                    write!(out, "{}", span.content.as_str().with(Color::Black).on(bg))?;
                }
                writeln!(out)?;
            }
        }
    }
    writeln!(
        out,
        "Characters: {}  Tokens: {}",
        format_with_commas(view.stats.characters as u64),
        format_with_commas(view.stats.tokens as u64)
    )?;
    Ok(())
}
