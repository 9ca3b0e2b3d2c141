#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::ThemePreference;

pub const TITLE_MAX_LENGTH: usize = 30;

/// One persisted conversation. Records are owned exclusively by the session
/// store; the chat controller hands over complete records on save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSession {
    /// Derives a display title from the first message present at save time.
    /// Titles are never recomputed retroactively.
    pub fn derive_title(messages: &[Message]) -> String {
        if let Some(first) = messages.first() {
            let truncated = first.content.chars().take(TITLE_MAX_LENGTH).collect::<String>();
            return format!("{truncated}...");
        }

        return "New Chat".to_string();
    }
}

/// The scalar entries that survive a restart: the current session pointer,
/// the working message list, and the theme preference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub current_session_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub theme: ThemePreference,
}
