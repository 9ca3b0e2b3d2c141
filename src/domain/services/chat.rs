#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use chrono::Utc;

use super::Ingest;
use super::Sessions;
use crate::domain::models::Attachment;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatSession;
use crate::domain::models::ClientState;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::ThemePreference;

/// Orchestrates one conversation: user input, file attachments, the outbound
/// completion request, and session lifecycle. Holds the transient working
/// copy of the current message list; the session store owns the durable
/// records.
pub struct ChatState {
    pub session_id: Option<String>,
    pub created_at: i64,
    pub messages: Vec<Message>,
    pub attachments: Vec<Attachment>,
    pub waiting_for_backend: bool,
    pub theme: ThemePreference,
}

impl Default for ChatState {
    fn default() -> ChatState {
        return ChatState {
            session_id: None,
            created_at: 0,
            messages: vec![],
            attachments: vec![],
            waiting_for_backend: false,
            theme: ThemePreference::default(),
        };
    }
}

impl ChatState {
    /// Restores the working copy persisted by the last run, so a restart
    /// resumes where the user left off.
    pub async fn resume(sessions: &Sessions) -> ChatState {
        let state = sessions.load_state().await;
        let mut chat = ChatState {
            theme: state.theme,
            ..ChatState::default()
        };

        if let Some(id) = state.current_session_id {
            chat.session_id = Some(id.clone());
            chat.messages = state.messages;

            if let Ok(session) = sessions.load(&id).await {
                chat.created_at = session.created_at;
            }
        }

        return chat;
    }

    /// Validates and stages a file for the next submission. A rejected file
    /// is never added to the pending list; the reason is returned as the
    /// error text. Content is not read here.
    pub async fn attach(&mut self, path: PathBuf) -> Result<()> {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => bail!(format!("Not a file: {}", path.display())),
        };

        let metadata = tokio::fs::metadata(&path).await?;
        let validation = Ingest::validate(&name, metadata.len());
        if !validation.valid {
            bail!(validation
                .reason
                .unwrap_or_else(|| return "Invalid file".to_string()));
        }

        self.attachments
            .push(Attachment::new(&name, metadata.len(), path));

        return Ok(());
    }

    pub fn remove_attachment(&mut self, index: usize) -> Result<()> {
        if index >= self.attachments.len() {
            bail!(format!("No attached file at position {}", index + 1));
        }

        self.attachments.remove(index);
        return Ok(());
    }

    /// Resets the conversation to empty with no identifier. The prior
    /// session, if any, remains stored.
    pub async fn new_chat(&mut self, sessions: &Sessions) {
        self.session_id = None;
        self.created_at = 0;
        self.messages.clear();

        let state = ClientState {
            current_session_id: None,
            messages: vec![],
            theme: self.theme,
        };
        if let Err(err) = sessions.save_state(&state).await {
            tracing::error!(error = ?err, "failed to clear client state");
        }
    }

    /// Loads a stored session as the current conversation.
    pub async fn open(&mut self, id: &str, sessions: &Sessions) -> Result<()> {
        let session = sessions.load(id).await?;
        self.session_id = Some(session.id);
        self.created_at = session.created_at;
        self.messages = session.messages;

        self.persist_state(sessions).await;

        return Ok(());
    }

    /// Cycles the display preference and persists it; returns the new value
    /// so the caller can re-apply it.
    pub async fn cycle_theme(&mut self, sessions: &Sessions) -> ThemePreference {
        self.theme = self.theme.cycle();
        self.persist_state(sessions).await;

        return self.theme;
    }

    /// One conversation turn. Returns the number of messages appended so the
    /// caller knows what to display; a read fault on an attachment aborts the
    /// turn before any network call and appends nothing.
    pub async fn submit(
        &mut self,
        text: &str,
        backend: &BackendBox,
        sessions: &Sessions,
    ) -> Result<usize> {
        let trimmed = text.trim();
        if trimmed.is_empty() && self.attachments.is_empty() {
            return Ok(0);
        }
        if self.waiting_for_backend {
            return Ok(0);
        }

        let mut file_messages: Vec<Message> = vec![];
        for attachment in self.attachments.iter() {
            let content = Ingest::read_content(&attachment.path).await?;
            file_messages.push(Message::new(
                Role::User,
                &format!("Content of {}:\n{}", attachment.name, content),
            ));
        }

        // A fresh identifier is allocated on the first send only, never on
        // mere text entry.
        if self.session_id.is_none() {
            let now = Utc::now().timestamp_millis();
            self.session_id = Some(now.to_string());
            self.created_at = now;
        }

        let mut content = trimmed.to_string();
        if !self.attachments.is_empty() {
            let names = self
                .attachments
                .iter()
                .map(|e| return e.name.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            content = format!("{content}\n\nFiles attached: {names}");
        }

        let user_message = Message::new(Role::User, &content);

        // The synthetic file-content messages ride along on the request only;
        // they are never part of the visible or persisted conversation.
        let mut outbound = self.messages.clone();
        outbound.push(user_message.clone());
        outbound.extend(file_messages);

        self.messages.push(user_message);
        self.waiting_for_backend = true;

        let appended = match backend.complete(&outbound).await {
            Ok(reply) => {
                self.messages.push(reply);
                self.attachments.clear();
                2
            }
            Err(err) => {
                // The controller is the sole reporter for a failed turn, so
                // the notice is surfaced exactly once. Attachments stay in
                // place; the turn is not retried.
                tracing::error!(error = ?err, "completion request failed");
                self.messages.push(Message::new(
                    Role::Assistant,
                    &format!("⚠️ Error: {err}\n\nPlease try again. If the problem persists, check your internet connection or try again later."),
                ));
                2
            }
        };

        self.waiting_for_backend = false;
        self.persist(sessions).await;

        return Ok(appended);
    }

    /// Flushes the working copy to the store. Persistence faults are logged,
    /// never surfaced; the conversation continues in memory.
    async fn persist(&self, sessions: &Sessions) {
        let id = match self.session_id.as_ref() {
            Some(id) => id.to_string(),
            None => return,
        };

        let session = ChatSession {
            id: id.to_string(),
            title: ChatSession::derive_title(&self.messages),
            messages: self.messages.clone(),
            created_at: self.created_at,
            updated_at: Utc::now().timestamp_millis(),
        };

        if let Err(err) = sessions.save(&session).await {
            tracing::error!(error = ?err, id = id, "failed to save chat session");
        }

        self.persist_state(sessions).await;
    }

    async fn persist_state(&self, sessions: &Sessions) {
        let state = ClientState {
            current_session_id: self.session_id.clone(),
            messages: self.messages.clone(),
            theme: self.theme,
        };

        if let Err(err) = sessions.save_state(&state).await {
            tracing::error!(error = ?err, "failed to save client state");
        }
    }
}
