use super::build;
use super::format_session;
use crate::domain::models::ChatSession;
use crate::domain::models::Message;
use crate::domain::models::Role;

#[test]
fn it_builds_a_valid_command_tree() {
    build().debug_assert();
}

#[test]
fn it_formats_session_listings() {
    let messages = vec![
        Message::new(Role::User, "How do I write a binary search in Rust?"),
        Message::new(Role::Assistant, "Here you go."),
    ];
    let session = ChatSession {
        id: "1700000000000".to_string(),
        title: ChatSession::derive_title(&messages),
        messages,
        created_at: 1700000000000,
        updated_at: 1700000000000,
    };

    insta::assert_snapshot!(format_session(&session), @"- (ID: 1700000000000) How do I write a binary search..., 2 messages, updated 2023-11-14 22:13");
}

#[test]
fn it_falls_back_to_the_raw_timestamp_when_out_of_range() {
    let session = ChatSession {
        id: "abc".to_string(),
        title: "New Chat".to_string(),
        messages: vec![],
        created_at: i64::MAX,
        updated_at: i64::MAX,
    };

    let formatted = format_session(&session);
    assert!(formatted.contains(&i64::MAX.to_string()));
}
