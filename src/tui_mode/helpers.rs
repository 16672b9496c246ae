use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            let mut chunk = String::new();
            let mut chunk_width = 0;
            for c in word.chars() {
                let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                if chunk_width + char_width > width {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(c);
                chunk_width += char_width;
            }
            if !chunk.is_empty() {
                lines.push(chunk);
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Normalizes spacing: one space around binary operators, none inside
/// parentheses or after a unary sign.
pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    // whether the previous significant char ended an operand
    let mut after_operand = false;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '+' | '-' | '*' | '/' if after_operand => {
                result.push(' ');
                result.push(c);
                result.push(' ');
                after_operand = false;
            }
            '+' | '-' | '*' | '/' | '(' => {
                result.push(c);
                after_operand = false;
            }
            _ => {
                result.push(c);
                after_operand = true;
            }
        }
    }

    result
}

pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut number = String::new();

    for c in expr.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        if !number.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut number), number_style));
        }

        match c {
            '+' | '-' | '*' | '/' => spans.push(Span::styled(c.to_string(), operator_style)),
            ' ' => spans.push(Span::raw(" ")),
            _ => spans.push(Span::styled(c.to_string(), base_style)),
        }
    }

    if !number.is_empty() {
        spans.push(Span::styled(number, number_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_normalized() {
        assert_eq!(format_with_spaces("2+3*4"), "2 + 3 * 4");
        assert_eq!(format_with_spaces(" ( 2+3 )*-4"), "(2 + 3) * -4");
        assert_eq!(format_with_spaces("--5"), "--5");
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap_text("1234567", 3), vec!["123", "456", "7"]);
        assert_eq!(wrap_text("1 + 2 + 3", 5), vec!["1 + 2", "+ 3"]);
        assert_eq!(wrap_text("", 0), vec![""]);
    }

    #[test]
    fn numbers_and_operators_get_their_own_spans() {
        let spans = highlight_expression("12+3.5", Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| &*s.content).collect();
        assert_eq!(texts, vec!["12", "+", "3.5"]);
    }
}
