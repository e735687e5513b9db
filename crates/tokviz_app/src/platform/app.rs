use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::Context;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use engine_logging::{engine_debug, engine_info, engine_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokviz_core::{update, AppState, AppViewModel, BackendKind, Msg};
use tokviz_engine::{BackendRegistry, BackendStatus};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::constants::POLL_INTERVAL;
use super::ui::render::BackendTab;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let registry = BackendRegistry::load(&config.backends);
    let mut session = Session::new(
        AppState::with_input(config.initial_text, config.backend),
        EffectRunner::new(registry),
    );

    let mut guard = TerminalGuard::enter().context("setting up terminal")?;
    let result = session.run(&mut guard.terminal);
    guard.restore().context("restoring terminal")?;
    engine_info!("tokviz exiting");
    result
}

/// Owns the terminal while the UI runs. Raw mode and the alternate screen
/// are left again on every exit path, panics included.
struct TerminalGuard {
    terminal: Tui,
    restored: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
        let terminal = match terminal {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_terminal(&mut io::stdout());
                return Err(err);
            }
        };

        // Leave the alternate screen before the panic message is printed.
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = leave_terminal(&mut io::stdout());
            default_hook(info);
        }));

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        self.restored = true;
        let _ = panic::take_hook();
        leave_terminal(self.terminal.backend_mut())?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(err) = leave_terminal(self.terminal.backend_mut()) {
                engine_warn!("Failed to restore terminal: {}", err);
            }
        }
    }
}

fn leave_terminal(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableBracketedPaste, Show)
}

/// What the event loop should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Dispatch(Msg),
    Redraw,
    Quit,
    Ignore,
}

/// Owns the session state and routes input events through `update`.
struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        self.dispatch(Msg::Refresh);
        self.state.consume_dirty();
        self.draw(terminal)?;

        loop {
            let control = if event::poll(POLL_INTERVAL)? {
                self.handle_event(event::read()?)
            } else {
                Control::Dispatch(Msg::Tick)
            };

            match control {
                Control::Quit => return Ok(()),
                Control::Redraw => self.draw(terminal)?,
                Control::Dispatch(msg) => {
                    self.dispatch(msg);
                    if self.state.consume_dirty() {
                        self.draw(terminal)?;
                    }
                }
                Control::Ignore => {}
            }
        }
    }

    /// Applies `msg` and feeds effect results back until the queue drains.
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }

    fn draw(&self, terminal: &mut Tui) -> anyhow::Result<()> {
        let view: AppViewModel = self.state.view();
        let tabs = self.backend_tabs();
        terminal.draw(|frame| ui::render::draw(frame, &view, &tabs))?;
        Ok(())
    }

    fn backend_tabs(&self) -> Vec<BackendTab> {
        BackendKind::ALL
            .into_iter()
            .map(|kind| BackendTab {
                kind,
                ready: self.runner.status(kind) == BackendStatus::Ready,
            })
            .collect()
    }

    fn handle_event(&self, event: Event) -> Control {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(pasted) => {
                let mut text = self.state.text().to_string();
                text.push_str(&normalize_newlines(&pasted));
                Control::Dispatch(Msg::TextEdited(text))
            }
            Event::Resize(..) => Control::Redraw,
            _ => Control::Ignore,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Ignore;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let backend = self.state.backend();

        match key.code {
            KeyCode::Esc => Control::Quit,
            KeyCode::Char('c') if ctrl => Control::Quit,
            KeyCode::Char('l') if ctrl => Control::Dispatch(Msg::ClearClicked),
            KeyCode::Tab => Control::Dispatch(Msg::BackendSelected(
                self.cycle_backend(backend, BackendKind::next).key().to_string(),
            )),
            KeyCode::BackTab => Control::Dispatch(Msg::BackendSelected(
                self.cycle_backend(backend, BackendKind::previous).key().to_string(),
            )),
            KeyCode::F(2) => Control::Dispatch(Msg::ToggleViewClicked),
            KeyCode::Enter => self.edit(|text| text.push('\n')),
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit(|text| text.push(ch))
            }
            other => {
                engine_debug!("Unhandled key {:?}", other);
                Control::Ignore
            }
        }
    }

    /// Next ready backend in `step` direction. With none ready besides
    /// `from`, the plain neighbour is returned so the failure gets reported.
    fn cycle_backend(
        &self,
        from: BackendKind,
        step: fn(BackendKind) -> BackendKind,
    ) -> BackendKind {
        std::iter::successors(Some(step(from)), |&kind| Some(step(kind)))
            .take_while(|&kind| kind != from)
            .find(|&kind| self.runner.status(kind) == BackendStatus::Ready)
            .unwrap_or_else(|| step(from))
    }

    fn edit(&self, apply: impl FnOnce(&mut String)) -> Control {
        let mut text = self.state.text().to_string();
        apply(&mut text);
        Control::Dispatch(Msg::TextEdited(text))
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
