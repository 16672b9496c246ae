use std::io::{stdin, stdout, Stdout, Write};

use anyhow::{Context, Result};
use exprcalc::Calculator;
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::{IntoRawMode, RawTerminal},
};

use crate::commands::{parse_command, Command};
use crate::display::{format_age, format_result};

const PROMPT: &str = "Expression: ";

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

pub fn run_line(calculator: Calculator) -> Result<()> {
    println!("Rust Console Calculator");
    println!("Supports: +, -, *, / and parentheses");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Commands: 'help', 'history', 'clear', 'quit'\n");

    let mut stdout = stdout()
        .into_raw_mode()
        .context("failed to switch terminal to raw mode")?;

    loop {
        let Some(line) = read_expression(&mut stdout, &calculator)? else {
            write!(stdout, "\r\n")?;
            return Ok(());
        };

        match parse_command(&line) {
            Command::Nothing => {
                write!(stdout, "\r\n")?;
            }
            Command::Quit => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                return Ok(());
            }
            Command::Help => print_help(&mut stdout)?,
            Command::History => print_history(&mut stdout, &calculator)?,
            Command::Clear => {
                calculator.clear_history();
                write!(stdout, "\r\nHistory cleared\r\n\n")?;
            }
            Command::Evaluate(expression) => match calculator.calculate(expression) {
                Ok(result) => {
                    write!(stdout, "\r\n  {} = {}\r\n\n", expression, format_result(result))?;
                }
                Err(e) => {
                    write!(stdout, "\r\n  {} = Error: {}\r\n\n", expression, e)?;
                }
            },
        }
        stdout.flush()?;
    }
}

/// Reads one line with in-place editing. `None` on Ctrl+C, Ctrl+D or end of input.
fn read_expression(
    stdout: &mut RawTerminal<Stdout>,
    calculator: &Calculator,
) -> Result<Option<String>> {
    let recall: Vec<String> = calculator
        .history()
        .into_iter()
        .map(|entry| entry.expression)
        .collect();
    let mut recall_index = recall.len();

    let mut expression = String::new();
    let mut cursor_pos = 0;

    write!(stdout, "{}{}", ClearLine, PROMPT)?;
    stdout.flush()?;
    let (_, initial_y) = stdout.cursor_pos()?;

    let stdin = stdin();
    let mut keys = stdin.keys();

    loop {
        write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;

        let prefix: String = expression.chars().take(cursor_pos).collect();
        let column = PROMPT.len() + unicode_width::UnicodeWidthStr::width(prefix.as_str()) + 1;
        write!(stdout, "{}", Goto(column as u16, initial_y))?;
        stdout.flush()?;

        let Some(key) = keys.next() else {
            return Ok(None);
        };

        match key? {
            Key::Char('\n') => return Ok(Some(expression)),
            Key::Ctrl('c') | Key::Ctrl('d') => return Ok(None),
            Key::Ctrl('u') => {
                expression.clear();
                cursor_pos = 0;
            }
            Key::Char(c) => {
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                expression.insert(byte_idx, c);
                cursor_pos += 1;
            }
            Key::Backspace if cursor_pos > 0 => {
                cursor_pos -= 1;
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                if let Some(c) = expression[byte_idx..].chars().next() {
                    expression.drain(byte_idx..byte_idx + c.len_utf8());
                }
            }
            Key::Delete if cursor_pos < expression.chars().count() => {
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                if let Some(c) = expression[byte_idx..].chars().next() {
                    expression.drain(byte_idx..byte_idx + c.len_utf8());
                }
            }
            Key::Left if cursor_pos > 0 => cursor_pos -= 1,
            Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
            Key::Home => cursor_pos = 0,
            Key::End => cursor_pos = expression.chars().count(),
            Key::Up if recall_index > 0 => {
                recall_index -= 1;
                expression = recall[recall_index].clone();
                cursor_pos = expression.chars().count();
            }
            Key::Down => {
                if recall_index + 1 < recall.len() {
                    recall_index += 1;
                    expression = recall[recall_index].clone();
                } else {
                    recall_index = recall.len();
                    expression.clear();
                }
                cursor_pos = expression.chars().count();
            }
            _ => {}
        }
    }
}

fn print_help(stdout: &mut RawTerminal<Stdout>) -> Result<()> {
    write!(stdout, "\r\n")?;
    for line in [
        "  + - * /   : arithmetic, * and / bind tighter than + and -",
        "  ( )       : grouping, e.g. (2 + 3) * 4",
        "  -x, +x    : unary sign, e.g. -(5 + 3) or --5",
        "  history   : list recorded calculations",
        "  clear     : clear the history",
        "  quit      : exit the calculator",
    ] {
        write!(stdout, "{}\r\n", line)?;
    }
    write!(stdout, "\r\n")?;
    Ok(())
}

fn print_history(stdout: &mut RawTerminal<Stdout>, calculator: &Calculator) -> Result<()> {
    let entries = calculator.history();
    write!(stdout, "\r\n")?;
    if entries.is_empty() {
        write!(stdout, "  No calculations yet\r\n\n")?;
        return Ok(());
    }
    for entry in entries {
        write!(
            stdout,
            "  #{:<4} {} = {}  ({})\r\n",
            entry.id,
            entry.expression,
            format_result(entry.result),
            format_age(entry.timestamp)
        )?;
    }
    write!(stdout, "\r\n")?;
    Ok(())
}
