pub mod app;
mod helpers;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    cursor::{SetCursorStyle, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exprcalc::Calculator;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub(crate) fn run_tui(calculator: Calculator) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(calculator);

    let outcome = ui::run_ui_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    outcome
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetCursorStyle::BlinkingBar)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(Into::into)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        Show,
        SetCursorStyle::DefaultUserShape
    )?;
    Ok(())
}
