#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::ChatSession;
use crate::domain::models::ClientState;

const STATE_FILE: &str = "state.yaml";

/// Durable mapping from session id to conversation record, one YAML file per
/// session. There is no in-memory cache; every call round-trips to disk. The
/// store assumes a single active writer — concurrent processes can race and
/// silently overwrite each other's records.
pub struct Sessions {
    pub store_dir: path::PathBuf,
}

impl Default for Sessions {
    fn default() -> Sessions {
        let store_dir = dirs::cache_dir().unwrap().join("chai/sessions");

        return Sessions::new(store_dir);
    }
}

impl Sessions {
    pub fn new(store_dir: path::PathBuf) -> Sessions {
        return Sessions { store_dir };
    }

    fn session_path(&self, id: &str) -> path::PathBuf {
        return self.store_dir.join(format!("{id}.yaml"));
    }

    fn state_path(&self) -> path::PathBuf {
        return self.store_dir.join(STATE_FILE);
    }

    /// Returns every persisted session, newest activity first. Store
    /// corruption or unavailability is non-fatal: bad records are skipped and
    /// logged, an unreadable store yields an empty list.
    pub async fn get_all(&self) -> Vec<ChatSession> {
        match self.read_all().await {
            Ok(sessions) => return sessions,
            Err(err) => {
                tracing::error!(error = ?err, "failed to list chat sessions");
                return vec![];
            }
        }
    }

    async fn read_all(&self) -> Result<Vec<ChatSession>> {
        let mut sessions: Vec<ChatSession> = vec![];
        if !self.store_dir.exists() {
            return Ok(sessions);
        }

        let mut dir = fs::read_dir(&self.store_dir).await?;
        while let Some(file) = dir.next_entry().await? {
            if file.file_name().to_string_lossy() == STATE_FILE {
                continue;
            }

            let payload = fs::read_to_string(file.path()).await?;
            match serde_yaml::from_str::<ChatSession>(&payload) {
                Ok(session) => sessions.push(session),
                Err(err) => {
                    tracing::error!(error = ?err, file = ?file.path(), "skipping corrupt session record");
                }
            }
        }

        sessions.sort_by_key(|session| return -session.updated_at);

        return Ok(sessions);
    }

    pub async fn load(&self, id: &str) -> Result<ChatSession> {
        let file_path = self.session_path(id);
        if !file_path.exists() {
            bail!(format!("No session found for id {id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let session: ChatSession = serde_yaml::from_str(&payload)?;

        return Ok(session);
    }

    /// Full-record upsert by id. No partial-field merge; callers supply the
    /// complete record.
    pub async fn save(&self, session: &ChatSession) -> Result<()> {
        let payload = serde_yaml::to_string(session)?;

        if !self.store_dir.exists() {
            fs::create_dir_all(&self.store_dir).await?;
        }

        let mut file = fs::File::create(self.session_path(&session.id)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    /// Deleting an absent id is a no-op success.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let file_path = self.session_path(id);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }

    pub async fn delete_all(&self) -> Result<()> {
        if !self.store_dir.exists() {
            return Ok(());
        }

        fs::remove_dir_all(&self.store_dir).await?;
        return Ok(());
    }

    pub fn has_state(&self) -> bool {
        return self.state_path().exists();
    }

    /// The scalar client state that survives a restart. Missing or corrupt
    /// state degrades to the defaults with a logged fault.
    pub async fn load_state(&self) -> ClientState {
        let file_path = self.state_path();
        if !file_path.exists() {
            return ClientState::default();
        }

        match fs::read_to_string(&file_path).await {
            Ok(payload) => match serde_yaml::from_str::<ClientState>(&payload) {
                Ok(state) => return state,
                Err(err) => {
                    tracing::error!(error = ?err, "corrupt client state, starting fresh");
                    return ClientState::default();
                }
            },
            Err(err) => {
                tracing::error!(error = ?err, "failed to read client state");
                return ClientState::default();
            }
        }
    }

    pub async fn save_state(&self, state: &ClientState) -> Result<()> {
        let payload = serde_yaml::to_string(state)?;

        if !self.store_dir.exists() {
            fs::create_dir_all(&self.store_dir).await?;
        }

        let mut file = fs::File::create(self.state_path()).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }
}
