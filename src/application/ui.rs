use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use yansi::Paint;

use crate::application::cli::format_session;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::Block;
use crate::domain::models::Inline;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::ThemePreference;
use crate::domain::services::ChatState;
use crate::domain::services::Renderer;
use crate::domain::services::Sessions;
use crate::domain::services::Themes;
use crate::infrastructure::backends::openrouter::OpenRouter;

pub fn help_text() -> &'static str {
    return r#"COMMANDS:
- /attach <path> - Stage a file to send with your next message.
- /detach <n> - Remove a staged file by its position.
- /files - List staged files.
- /new - Start a new chat. The previous session stays stored.
- /sessions - List stored sessions.
- /open <id> - Resume a stored session.
- /delete <id> - Delete a stored session.
- /theme - Cycle the display theme (light, dark, system).
- /help - Show this help.
- /quit - Exit."#;
}

fn print_inline(spans: &[Inline]) -> String {
    return spans
        .iter()
        .map(|span| {
            match span {
                Inline::Plain(text) => return text.to_string(),
                Inline::Bold(text) => return Paint::new(text).bold().to_string(),
                Inline::Italic(text) => return Paint::new(text).italic().to_string(),
                Inline::Code(text) => return Paint::cyan(text).to_string(),
            };
        })
        .collect::<Vec<String>>()
        .join("");
}

fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Header { level, text } => {
                let painted = match level {
                    1 => Paint::new(text).bold().underline().to_string(),
                    2 => Paint::new(text).bold().to_string(),
                    _ => Paint::new(text).bold().dimmed().to_string(),
                };
                println!("{painted}");
            }
            Block::Code {
                language, markup, ..
            } => {
                println!("{}", Paint::new(format!("```{language}")).dimmed());
                println!("{markup}");
                println!("{}", Paint::new("```").dimmed());
            }
            Block::Text(spans) => {
                println!("{}", print_inline(spans));
            }
            Block::Break => {
                println!();
            }
        }
    }
}

fn print_message(renderer: &Renderer, message: &Message) {
    let label = match message.role {
        Role::User => Paint::cyan(Config::get(ConfigKey::Username)).bold(),
        Role::Assistant => Paint::magenta(Config::get(ConfigKey::SiteName)).bold(),
    };

    println!("{label}:");
    print_blocks(&renderer.render(&message.content));
    println!();
}

fn print_notice(text: &str) {
    println!("{}", Paint::new(text).dimmed());
}

fn print_fault(text: &str) {
    println!("{}", Paint::red(text));
}

fn prompt() -> Result<()> {
    print!("{} ", Paint::green(">").bold());
    std::io::stdout().flush()?;
    return Ok(());
}

pub async fn start() -> Result<()> {
    let sessions = Sessions::default();
    let backend: BackendBox = Box::<OpenRouter>::default();

    // The persisted preference wins once it exists; the --theme flag and
    // config key seed fresh installs only.
    let seed_theme = !sessions.has_state();
    let mut state = ChatState::resume(&sessions).await;
    if seed_theme {
        state.theme = ThemePreference::parse(&Config::get(ConfigKey::Theme));
    }

    let opened_session_id = Config::get(ConfigKey::SessionID);
    if !opened_session_id.is_empty() {
        state.open(&opened_session_id, &sessions).await?;
    }

    let mut renderer = Renderer::new(Themes::get(state.theme)?);

    if let Err(err) = backend.health_check().await {
        print_fault(&format!("⚠️ {err}"));
    }

    print_notice(&format!(
        "chai v{} — chatting with {}. Type /help for commands.",
        env!("CARGO_PKG_VERSION"),
        Config::get(ConfigKey::Model)
    ));
    println!();

    for message in state.messages.clone().iter() {
        print_message(&renderer, message);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines_reader = stdin.lines();

    loop {
        prompt()?;
        let line = match lines_reader.next_line().await? {
            Some(line) => line,
            None => break,
        };

        match SlashCommand::parse(&line) {
            Some(SlashCommand::Quit) => {
                break;
            }
            Some(SlashCommand::New) => {
                state.new_chat(&sessions).await;
                print_notice("Started a new chat.");
            }
            Some(SlashCommand::Attach(path)) => {
                match state.attach(PathBuf::from(path)).await {
                    Ok(()) => {
                        if let Some(attachment) = state.attachments.last() {
                            print_notice(&format!(
                                "Attached {} ({:.2} KB)",
                                attachment.name,
                                attachment.size as f64 / 1024.0
                            ));
                        }
                    }
                    Err(err) => {
                        print_fault(&format!("⚠️ {err}"));
                    }
                };
            }
            Some(SlashCommand::Detach(index)) => match state.remove_attachment(index) {
                Ok(()) => print_notice("Removed."),
                Err(err) => print_fault(&format!("⚠️ {err}")),
            },
            Some(SlashCommand::Files) => {
                if state.attachments.is_empty() {
                    print_notice("No files staged.");
                }
                for (idx, attachment) in state.attachments.iter().enumerate() {
                    println!(
                        "{}. {} ({:.2} KB)",
                        idx + 1,
                        attachment.name,
                        attachment.size as f64 / 1024.0
                    );
                }
            }
            Some(SlashCommand::Sessions) => {
                let all = sessions.get_all().await;
                if all.is_empty() {
                    print_notice("There are no sessions yet. Send a message to start one!");
                }
                for session in all.iter() {
                    println!("{}", format_session(session));
                }
            }
            Some(SlashCommand::Open(id)) => match state.open(&id, &sessions).await {
                Ok(()) => {
                    println!();
                    for message in state.messages.clone().iter() {
                        print_message(&renderer, message);
                    }
                }
                Err(err) => {
                    print_fault(&format!("⚠️ {err}"));
                }
            },
            Some(SlashCommand::Delete(id)) => {
                if let Err(err) = sessions.delete(&id).await {
                    tracing::error!(error = ?err, id = id, "failed to delete session");
                }
                if state.session_id.as_deref() == Some(id.as_str()) {
                    state.new_chat(&sessions).await;
                }
                print_notice(&format!("Deleted session {id}"));
            }
            Some(SlashCommand::Theme) => {
                let theme = state.cycle_theme(&sessions).await;
                renderer = Renderer::new(Themes::get(theme)?);
                print_notice(&format!("Theme preference set to {}.", theme.to_string()));
            }
            Some(SlashCommand::Help) => {
                println!("{}", help_text());
            }
            Some(SlashCommand::Unknown(input)) => {
                print_fault(&format!("Unknown command: {input}"));
                println!("{}", help_text());
            }
            None => {
                let before = state.messages.len();
                print_notice("Thinking...");
                match state.submit(&line, &backend, &sessions).await {
                    Ok(_) => {
                        for message in state.messages.clone()[before..].iter() {
                            if message.role == Role::Assistant {
                                print_message(&renderer, message);
                            }
                        }
                    }
                    Err(err) => {
                        print_fault(&format!("⚠️ {err}"));
                    }
                };
            }
        }
    }

    return Ok(());
}
