use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, scroll: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Calculator Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled(
            "exprcalc - Terminal Arithmetic Calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Operations:"),
        Line::from("  + : Addition        (e.g., 5 + 3 = 8)"),
        Line::from("  - : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  * : Multiplication  (e.g., 6 * 7 = 42)"),
        Line::from("  / : Division        (e.g., 15 / 3 = 5)"),
        Line::from("  ( ) : Grouping      (e.g., (2 + 3) * 4 = 20)"),
        Line::from("  -x, +x : Unary sign (e.g., -(5 + 3) = -8, --5 = 5)"),
        Line::from(""),
        Line::from("  * and / bind tighter than + and -; equal operators group left to right."),
        Line::from("  Numbers are decimal literals such as 42 or 3.14."),
        Line::from(""),
        section("Commands:"),
        Line::from("  history : Show recorded calculations (also F2)"),
        Line::from("  clear   : Clear calculation history and session"),
        Line::from("  help    : Show this help screen (also F1)"),
        Line::from("  quit    : Exit the calculator"),
        Line::from(""),
        section("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Recall previous expressions"),
        Line::from("  PgUp/PgDn : Page through the session"),
        Line::from("  Mouse wheel : Scroll"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Esc : Close this screen"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
