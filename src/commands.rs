/// What a line of shell input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    History,
    Clear,
    Quit,
    Evaluate(&'a str),
    Nothing,
}

pub fn parse_command(line: &str) -> Command<'_> {
    let input = line.trim();
    if input.is_empty() {
        return Command::Nothing;
    }

    match input.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "history" => Command::History,
        "clear" | "reset" => Command::Clear,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Evaluate(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_command("HELP"), Command::Help);
        assert_eq!(parse_command("  History "), Command::History);
        assert_eq!(parse_command("clear"), Command::Clear);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn everything_else_is_an_expression() {
        assert_eq!(parse_command(" 2 + 2 "), Command::Evaluate("2 + 2"));
        assert_eq!(parse_command("quitter"), Command::Evaluate("quitter"));
        assert_eq!(parse_command("   "), Command::Nothing);
    }
}
