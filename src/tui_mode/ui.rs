use super::app::{App, Overlay};
use super::helpers::{format_with_spaces, highlight_expression, wrap_text};
use crate::display::{format_age, format_result};
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| match app.overlay {
            Overlay::Help => render_help(f, app.overlay_scroll),
            Overlay::History => render_history_overlay(f, app),
            Overlay::None => ui(f, app),
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.overlay != Overlay::None {
        match code {
            KeyCode::Down => app.overlay_scroll = app.overlay_scroll.saturating_add(1),
            KeyCode::Up => app.overlay_scroll = app.overlay_scroll.saturating_sub(1),
            KeyCode::PageDown => app.overlay_scroll = app.overlay_scroll.saturating_add(10),
            KeyCode::PageUp => app.overlay_scroll = app.overlay_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_overlay(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_cursor_by_words(-1);
        }
        KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_cursor_by_words(1);
        }
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => {
            app.cursor_position = 0;
            app.input_scroll = 0;
        }
        KeyCode::End => {
            app.cursor_position = app.input.chars().count();
        }
        KeyCode::Up => app.recall(-1),
        KeyCode::Down => app.recall(1),
        KeyCode::PageUp => app.scroll_transcript(-1),
        KeyCode::PageDown => app.scroll_transcript(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => app.open_overlay(Overlay::Help),
        KeyCode::F(2) => app.open_overlay(Overlay::History),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    match event.kind {
        MouseEventKind::ScrollDown => app.wheel(1),
        MouseEventKind::ScrollUp => app.wheel(-1),
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small = terminal_size.width < MIN_TERMINAL_WIDTH
        || terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(terminal_size);

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_transcript(frame, app, layout[2]);
    app.list_height = layout[2].height as usize;
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Session ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.transcript.is_empty() {
        let empty_msg =
            Paragraph::new("No calculations yet. Enter an expression to see results here.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let mut items = Vec::new();
    app.item_start_indices.clear();

    let wrap_width = inner_area.width.saturating_sub(4) as usize;

    for (i, entry) in app.transcript.iter().enumerate() {
        app.item_start_indices.push(items.len());

        let base_style = Style::default().fg(if i == app.selected {
            Color::Yellow
        } else {
            Color::Cyan
        });

        let input = format_with_spaces(&entry.input);
        for (line_idx, line) in wrap_text(&input, wrap_width).into_iter().enumerate() {
            let mut spans = vec![if line_idx == 0 {
                Span::styled("> ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            }];

            spans.extend(highlight_expression(&line, base_style));

            if line_idx == 0 {
                spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
                match &entry.result {
                    Ok(val) => spans.push(Span::styled(
                        format_result(*val),
                        Style::default()
                            .fg(Color::LightMagenta)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Err(e) => spans.push(Span::styled(
                        format!("Error: {}", e),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                }
            }

            items.push(ListItem::new(Line::from(spans)));
        }

        items.push(ListItem::new(Line::from(Span::styled(
            format!("    - Time: {:.6} ms", entry.duration.as_secs_f64() * 1000.0),
            Style::default().fg(Color::DarkGray),
        ))));
    }

    if app.scroll_to_bottom {
        app.transcript_scroll = items.len().saturating_sub(inner_area.height as usize);
        app.scroll_to_bottom = false;
    }

    app.transcript_scroll = app.transcript_scroll.min(items.len().saturating_sub(1));

    // a selection makes ratatui pull the offset back to it
    let selected_index = if app.follow_selection {
        app.item_start_indices.get(app.selected).copied()
    } else {
        None
    };

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default()
        .with_selected(selected_index)
        .with_offset(app.transcript_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
    app.transcript_scroll = state.offset();
}

fn render_history_overlay(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" History (Esc to close) ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let entries = app.calculator.history();
    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled(
            "No calculations recorded.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!("#{:<4} ", entry.id), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format_with_spaces(&entry.expression),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(" = ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format_result(entry.result),
                        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  ({})", format_age(entry.timestamp)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.overlay_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let keys = [
        ("Enter", "Calculate"),
        ("Up/Down", "Recall"),
        ("PgUp/PgDn", "Scroll"),
        ("F1", "Help"),
        ("F2", "History"),
        ("Ctrl+U", "Clear Input"),
    ];

    let mut spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    if let Some(ans) = app.calculator.last_result() {
        spans.push(Span::styled(
            format!(" ans = {}", format_result(ans)),
            Style::default().fg(Color::LightMagenta),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(2)) as usize;
    let total_chars = app.input.chars().count();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app
        .input
        .chars()
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    frame.render_widget(Paragraph::new(format!("> {}", visible_input)), inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix = visible_input.chars().take(visible_cursor).collect::<String>();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    frame.set_cursor(cursor_x, inner_area.y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total_chars > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}
