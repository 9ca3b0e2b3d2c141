#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

/// Commands entered at the prompt. Anything not starting with a slash is a
/// chat submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlashCommand {
    Attach(String),
    Delete(String),
    Detach(usize),
    Files,
    Help,
    New,
    Open(String),
    Quit,
    Sessions,
    Theme,
    Unknown(String),
}

impl SlashCommand {
    pub fn parse(input: &str) -> Option<SlashCommand> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let (command, args) = match trimmed.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (trimmed, ""),
        };

        let parsed = match command {
            "/attach" if !args.is_empty() => SlashCommand::Attach(args.to_string()),
            "/delete" if !args.is_empty() => SlashCommand::Delete(args.to_string()),
            "/detach" => match args.parse::<usize>() {
                Ok(position) if position > 0 => SlashCommand::Detach(position - 1),
                _ => SlashCommand::Unknown(trimmed.to_string()),
            },
            "/files" => SlashCommand::Files,
            "/help" | "/h" => SlashCommand::Help,
            "/new" => SlashCommand::New,
            "/open" if !args.is_empty() => SlashCommand::Open(args.to_string()),
            "/quit" | "/q" | "/exit" => SlashCommand::Quit,
            "/sessions" => SlashCommand::Sessions,
            "/theme" => SlashCommand::Theme,
            _ => SlashCommand::Unknown(trimmed.to_string()),
        };

        return Some(parsed);
    }
}
