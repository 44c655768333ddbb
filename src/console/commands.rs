//! Slash command parsing for the terminal front end.
//!
//! Any line that does not start with `/` is a question, including a blank
//! one.  Lines starting with `/` stand in for the page's buttons.

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Submit a question.  The text may be empty; the controller rejects it.
    Ask(String),

    /// Fetch and show the news headlines.
    News,

    /// Clear the conversation history, after confirmation.
    Clear,

    /// Show the conversation history again.
    History,

    /// Save the history as a JSON transcript.
    Save(String),

    /// Export the current panel as a standalone HTML page.
    Export(String),

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses one line of user input.
///
/// A blank line is an empty question, which the controller rejects with an
/// alert.
///
/// # Examples
///
/// ```
/// # use finsight::console::{ConsoleCommand, parse_command};
/// assert_eq!(parse_command("/news"), ConsoleCommand::News);
/// assert_eq!(
///     parse_command("What moved the market today?"),
///     ConsoleCommand::Ask("What moved the market today?".to_string())
/// );
/// assert_eq!(parse_command("   "), ConsoleCommand::Ask(String::new()));
/// ```
pub fn parse_command(input: &str) -> ConsoleCommand {
    let input = input.trim();

    let Some(rest) = input.strip_prefix('/') else {
        return ConsoleCommand::Ask(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    match command.as_str() {
        "ask" => ConsoleCommand::Ask(argument.unwrap_or_default().to_string()),
        "news" => ConsoleCommand::News,
        "clear" => ConsoleCommand::Clear,
        "history" => ConsoleCommand::History,
        "save" => match argument {
            Some(path) => ConsoleCommand::Save(path.to_string()),
            None => ConsoleCommand::Invalid("/save requires a file path".to_string()),
        },
        "export" => match argument {
            Some(path) => ConsoleCommand::Export(path.to_string()),
            None => ConsoleCommand::Invalid("/export requires a file path".to_string()),
        },
        "stats" | "status" => ConsoleCommand::Stats,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Invalid(format!("Unknown command: /{}", command)),
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Type a question and press enter to ask it.

Available commands:
  /ask <question>        Ask a question (same as typing it)
  /news                  Fetch the latest headlines with sentiment
  /history               Show the conversation history
  /clear                 Clear conversation history (asks first)
  /save <file>           Save the history as a JSON transcript
  /export <file>         Export the current panel as an HTML page
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_question() {
        assert_eq!(
            parse_command("  Should I buy bonds?  "),
            ConsoleCommand::Ask("Should I buy bonds?".to_string())
        );
    }

    #[test]
    fn blank_lines_are_empty_questions() {
        assert_eq!(parse_command(""), ConsoleCommand::Ask(String::new()));
        assert_eq!(parse_command(" \t "), ConsoleCommand::Ask(String::new()));
    }

    #[test]
    fn explicit_ask() {
        assert_eq!(
            parse_command("/ask   what is EBITDA "),
            ConsoleCommand::Ask("what is EBITDA".to_string())
        );
        assert_eq!(parse_command("/ask"), ConsoleCommand::Ask(String::new()));
        assert_eq!(parse_command("/ask    "), ConsoleCommand::Ask(String::new()));
    }

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), ConsoleCommand::Quit);
        assert_eq!(parse_command("/exit"), ConsoleCommand::Quit);
        assert_eq!(parse_command("/q"), ConsoleCommand::Quit);
    }

    #[test]
    fn parse_panel_commands() {
        assert_eq!(parse_command("/news"), ConsoleCommand::News);
        assert_eq!(parse_command("/NEWS"), ConsoleCommand::News);
        assert_eq!(parse_command("/clear"), ConsoleCommand::Clear);
        assert_eq!(parse_command("/history"), ConsoleCommand::History);
        assert_eq!(parse_command("/stats"), ConsoleCommand::Stats);
        assert_eq!(parse_command("/?"), ConsoleCommand::Help);
    }

    #[test]
    fn parse_file_commands() {
        assert_eq!(
            parse_command("/save chat.json"),
            ConsoleCommand::Save("chat.json".to_string())
        );
        assert_eq!(
            parse_command("/export panel.html"),
            ConsoleCommand::Export("panel.html".to_string())
        );
        assert!(matches!(
            parse_command("/save"),
            ConsoleCommand::Invalid(msg) if msg.contains("requires")
        ));
        assert!(matches!(
            parse_command("/export"),
            ConsoleCommand::Invalid(msg) if msg.contains("requires")
        ));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/bogus"),
            ConsoleCommand::Invalid("Unknown command: /bogus".to_string())
        );
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/news"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/quit"));
    }
}
