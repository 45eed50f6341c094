// Interactive command parsing

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick and classify a random review
    Analyze,
    /// Reload the review file
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Empty input means "analyze", like pressing the button
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "" | "a" | "/analyze" => Some(Command::Analyze),
            "r" | "/reload" => Some(Command::Reload),
            "h" | "?" | "/help" => Some(Command::Help),
            "q" | "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  <Enter>, /analyze  - Classify a random review
  /reload            - Reload the review file
  /help              - Show this help message
  /quit              - Exit"#
        .to_string()
}
