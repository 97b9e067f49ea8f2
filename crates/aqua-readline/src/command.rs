/// Slash commands understood by the REPL.
pub const COMMANDS: &[&str] = &[
    "/open",
    "/close",
    "/toggle",
    "/reset",
    "/history",
    "/status",
    "/subscribe",
    "/quit",
];

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Open,
    Close,
    Toggle,
    Reset,
    History,
    Status,
    Subscribe(String),
    Quit,
    Message(String),
    Unknown(String),
}

impl Input {
    /// Parses a non-empty, already trimmed line.
    pub fn parse(line: &str) -> Self {
        if !line.starts_with('/') {
            return match line {
                "quit" | "exit" => Input::Quit,
                _ => Input::Message(line.to_string()),
            };
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/open" => Input::Open,
            "/close" => Input::Close,
            "/toggle" => Input::Toggle,
            "/reset" => Input::Reset,
            "/history" => Input::History,
            "/status" => Input::Status,
            "/subscribe" => Input::Subscribe(rest.to_string()),
            "/quit" | "/exit" => Input::Quit,
            other => Input::Unknown(other.to_string()),
        }
    }
}
