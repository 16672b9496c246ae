use std::time::{Duration, Instant};

use exprcalc::Calculator;

use crate::commands::{parse_command, Command};

/// One line of the session transcript; errors are shown here but never
/// reach the calculator's history.
pub struct TranscriptEntry {
    pub input: String,
    pub result: Result<f64, String>,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    History,
}

pub struct App {
    pub calculator: Calculator,
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub transcript: Vec<TranscriptEntry>,
    pub selected: usize,
    pub recall_index: Option<usize>,
    pub should_quit: bool,
    pub overlay: Overlay,
    pub overlay_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub transcript_scroll: usize,
    /// Off while the mouse wheel scrolls freely, so the list does not snap
    /// back to the selected row.
    pub follow_selection: bool,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(calculator: Calculator) -> Self {
        App {
            calculator,
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            transcript: Vec::new(),
            selected: 0,
            recall_index: None,
            should_quit: false,
            overlay: Overlay::None,
            overlay_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            transcript_scroll: 0,
            follow_selection: true,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total_chars.saturating_sub(visible_width) {
            self.input_scroll = total_chars.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.input_scroll = 0;
        self.recall_index = None;

        match parse_command(&line) {
            Command::Nothing => {}
            Command::Quit => self.should_quit = true,
            Command::Help => self.open_overlay(Overlay::Help),
            Command::History => self.open_overlay(Overlay::History),
            Command::Clear => {
                self.calculator.clear_history();
                self.transcript.clear();
                self.selected = 0;
                self.transcript_scroll = 0;
                self.follow_selection = true;
            }
            Command::Evaluate(expression) => {
                let start_time = Instant::now();
                let result = self
                    .calculator
                    .calculate(expression)
                    .map_err(|e| e.to_string());
                let duration = start_time.elapsed();

                self.transcript.push(TranscriptEntry {
                    input: expression.to_string(),
                    result,
                    duration,
                });
                self.selected = self.transcript.len() - 1;
                self.follow_selection = true;
                self.scroll_to_bottom = true;
            }
        }
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.overlay_scroll = 0;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.overlay_scroll = 0;
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let input_chars: Vec<char> = self.input.chars().collect();
        let mut pos = self.cursor_position;

        if direction < 0 {
            while pos > 0 && input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
            while pos > 0 && !input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
        } else {
            let len = input_chars.len();
            while pos < len && !input_chars[pos].is_whitespace() {
                pos += 1;
            }
            while pos < len && input_chars[pos].is_whitespace() {
                pos += 1;
            }
        }
        self.cursor_position = pos;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete();
        }
    }

    pub fn delete(&mut self) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        if let Some(c) = self.input[byte_idx..].chars().next() {
            self.input.drain(byte_idx..byte_idx + c.len_utf8());
        }
    }

    /// Steps through previously recorded expressions, newest first.
    pub fn recall(&mut self, direction: i32) {
        let recorded = self.calculator.history();
        if recorded.is_empty() {
            return;
        }

        let next = match (self.recall_index, direction < 0) {
            (None, true) => Some(recorded.len() - 1),
            (Some(i), true) => Some(i.saturating_sub(1)),
            (Some(i), false) if i + 1 < recorded.len() => Some(i + 1),
            (_, false) => None,
        };

        self.recall_index = next;
        self.input = match next {
            Some(i) => recorded[i].expression.clone(),
            None => String::new(),
        };
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
    }

    pub fn scroll_transcript(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1).max(1);
        if direction < 0 {
            self.selected = self.selected.saturating_sub(step);
        } else {
            self.selected = self
                .selected
                .saturating_add(step)
                .min(self.transcript.len().saturating_sub(1));
        }
        self.follow_selection = true;
        self.scroll_to_bottom = false;
    }

    pub fn wheel(&mut self, direction: i32) {
        let scroll = if self.overlay == Overlay::None {
            self.follow_selection = false;
            self.scroll_to_bottom = false;
            &mut self.transcript_scroll
        } else {
            &mut self.overlay_scroll
        };

        if direction < 0 {
            *scroll = scroll.saturating_sub(3);
        } else {
            *scroll = scroll.saturating_add(3);
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
        self.recall_index = None;
    }

    pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
        s.char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_and_submit(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
        app.submit();
    }

    #[test]
    fn errors_go_to_transcript_only() {
        let mut app = App::new(Calculator::new());
        type_and_submit(&mut app, "2 + 3");
        type_and_submit(&mut app, "1 / 0");

        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript[0].result, Ok(5.0));
        assert!(app.transcript[1].result.is_err());
        assert_eq!(app.calculator.history_len(), 1);
        assert!(app.input.is_empty());
    }

    #[test]
    fn commands_drive_the_app() {
        let mut app = App::new(Calculator::new());
        type_and_submit(&mut app, "1 + 1");

        type_and_submit(&mut app, "history");
        assert_eq!(app.overlay, Overlay::History);
        app.close_overlay();

        type_and_submit(&mut app, "clear");
        assert!(app.transcript.is_empty());
        assert_eq!(app.calculator.history_len(), 0);

        type_and_submit(&mut app, "quit");
        assert!(app.should_quit);
    }

    #[test]
    fn recall_walks_recorded_expressions() {
        let mut app = App::new(Calculator::new());
        type_and_submit(&mut app, "1");
        type_and_submit(&mut app, "2 +");
        type_and_submit(&mut app, "3");

        app.recall(-1);
        assert_eq!(app.input, "3");
        app.recall(-1);
        assert_eq!(app.input, "1");
        app.recall(-1);
        assert_eq!(app.input, "1");
        app.recall(1);
        assert_eq!(app.input, "3");
        app.recall(1);
        assert_eq!(app.input, "");
    }

    #[test]
    fn wheel_scrolls_freely_until_keyboard_navigation() {
        let mut app = App::new(Calculator::new());
        for i in 0..10 {
            type_and_submit(&mut app, &i.to_string());
        }
        app.transcript_scroll = 12;
        assert!(app.follow_selection);

        app.wheel(-1);
        assert_eq!(app.transcript_scroll, 9);
        assert!(!app.follow_selection);
        assert_eq!(app.selected, 9);

        app.wheel(1);
        assert_eq!(app.transcript_scroll, 12);
        assert!(!app.follow_selection);

        app.scroll_transcript(-1);
        assert!(app.follow_selection);

        app.wheel(-1);
        type_and_submit(&mut app, "1 + 1");
        assert!(app.follow_selection);
        assert!(app.scroll_to_bottom);
    }

    #[test]
    fn wheel_in_overlay_keeps_transcript_state() {
        let mut app = App::new(Calculator::new());
        app.open_overlay(Overlay::History);
        app.wheel(1);
        assert_eq!(app.overlay_scroll, 3);
        assert_eq!(app.transcript_scroll, 0);
        assert!(app.follow_selection);
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut app = App::new(Calculator::new());
        for c in "1é2".chars() {
            app.insert_char(c);
        }
        app.move_cursor(-1);
        app.backspace();
        assert_eq!(app.input, "12");
        assert_eq!(app.cursor_position, 1);
    }
}
