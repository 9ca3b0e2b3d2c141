use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::Sessions;
use crate::domain::models::ChatSession;
use crate::domain::models::ClientState;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::ThemePreference;

fn fixture_session(id: &str, updated_at: i64) -> ChatSession {
    let messages = vec![
        Message::new(Role::User, "How do I write a binary search in Rust?"),
        Message::new(Role::Assistant, "Here you go:\n```rust\nfn search() {}\n```"),
    ];

    return ChatSession {
        id: id.to_string(),
        title: ChatSession::derive_title(&messages),
        messages,
        created_at: updated_at,
        updated_at,
    };
}

fn store() -> (tempfile::TempDir, Sessions) {
    let dir = tempfile::tempdir().unwrap();
    let sessions = Sessions::new(dir.path().join("sessions"));
    return (dir, sessions);
}

#[tokio::test]
async fn it_round_trips_sessions_exactly() -> Result<()> {
    let (_guard, sessions) = store();
    let session = fixture_session("1700000000000", 1700000000000);

    sessions.save(&session).await?;
    let loaded = sessions.load("1700000000000").await?;

    assert_eq!(loaded, session);
    assert_eq!(loaded.messages, session.messages);

    return Ok(());
}

#[tokio::test]
async fn it_upserts_by_id() -> Result<()> {
    let (_guard, sessions) = store();
    let mut session = fixture_session("abc", 1);

    sessions.save(&session).await?;
    session
        .messages
        .push(Message::new(Role::User, "One more thing..."));
    session.updated_at = 2;
    sessions.save(&session).await?;

    let all = sessions.get_all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].messages.len(), 3);
    assert_eq!(all[0].updated_at, 2);

    return Ok(());
}

#[tokio::test]
async fn it_lists_sessions_newest_first() -> Result<()> {
    let (_guard, sessions) = store();
    sessions.save(&fixture_session("older", 100)).await?;
    sessions.save(&fixture_session("newer", 200)).await?;

    let all = sessions.get_all().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "newer");
    assert_eq!(all[1].id, "older");

    return Ok(());
}

#[tokio::test]
async fn it_returns_empty_for_a_missing_store() {
    let (_guard, sessions) = store();
    assert!(sessions.get_all().await.is_empty());
}

#[tokio::test]
async fn it_deletes_sessions() -> Result<()> {
    let (_guard, sessions) = store();
    sessions.save(&fixture_session("abc", 1)).await?;

    sessions.delete("abc").await?;

    assert!(sessions.get_all().await.is_empty());
    assert!(sessions.load("abc").await.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_deletes_absent_ids_as_a_noop() -> Result<()> {
    let (_guard, sessions) = store();
    sessions.delete("never-existed").await?;

    return Ok(());
}

#[tokio::test]
async fn it_skips_corrupt_records() -> Result<()> {
    let (_guard, sessions) = store();
    sessions.save(&fixture_session("good", 1)).await?;

    let mut file = fs::File::create(sessions.store_dir.join("bad.yaml")).await?;
    file.write_all(b"{{{ not yaml").await?;

    let all = sessions.get_all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "good");

    return Ok(());
}

#[tokio::test]
async fn it_round_trips_client_state() -> Result<()> {
    let (_guard, sessions) = store();
    let state = ClientState {
        current_session_id: Some("abc".to_string()),
        messages: vec![Message::new(Role::User, "Hi")],
        theme: ThemePreference::Dark,
    };

    sessions.save_state(&state).await?;
    let loaded = sessions.load_state().await;

    assert_eq!(loaded, state);

    return Ok(());
}

#[tokio::test]
async fn it_defaults_client_state_when_missing() {
    let (_guard, sessions) = store();
    let state = sessions.load_state().await;

    assert_eq!(state, ClientState::default());
}

#[tokio::test]
async fn it_excludes_client_state_from_session_listings() -> Result<()> {
    let (_guard, sessions) = store();
    sessions.save_state(&ClientState::default()).await?;
    sessions.save(&fixture_session("abc", 1)).await?;

    let all = sessions.get_all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "abc");

    return Ok(());
}
