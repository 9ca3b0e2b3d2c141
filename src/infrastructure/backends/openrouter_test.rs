use anyhow::Result;

use super::CompletionChoiceResponse;
use super::CompletionResponse;
use super::OpenRouter;
use crate::domain::models::Backend;
use crate::domain::models::Message;
use crate::domain::models::Role;

impl OpenRouter {
    fn with_url(url: String) -> OpenRouter {
        return OpenRouter {
            url,
            token: "abc".to_string(),
            site_url: "http://localhost:3000".to_string(),
            site_name: "chai".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let backend = OpenRouter::with_url("https://openrouter.ai".to_string());
    assert!(backend.health_check().await.is_ok());
}

#[tokio::test]
async fn it_fails_health_checks_without_a_url() {
    let backend = OpenRouter::with_url("".to_string());
    assert!(backend.health_check().await.is_err());
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        choices: vec![
            CompletionChoiceResponse {
                message: Message::new(Role::Assistant, "Hello World"),
            },
            CompletionChoiceResponse {
                message: Message::new(Role::Assistant, "ignored second choice"),
            },
        ],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_header("Authorization", "Bearer abc")
        .match_header("HTTP-Referer", "http://localhost:3000")
        .match_header("X-Title", "chai")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = OpenRouter::with_url(server.url());
    let res = backend
        .complete(&[Message::new(Role::User, "Say hi to the world")])
        .await?;

    mock.assert();
    assert_eq!(res, Message::new(Role::Assistant, "Hello World"));

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_the_error_body_message_field() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(500)
        .with_body(r#"{"message":"rate limited"}"#)
        .create();

    let backend = OpenRouter::with_url(server.url());
    let res = backend
        .complete(&[Message::new(Role::User, "Hello?")])
        .await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "rate limited");
}

#[tokio::test]
async fn it_surfaces_the_error_field_when_message_is_absent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"No auth credentials found"}"#)
        .create();

    let backend = OpenRouter::with_url(server.url());
    let res = backend
        .complete(&[Message::new(Role::User, "Hello?")])
        .await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "No auth credentials found");
}

#[tokio::test]
async fn it_falls_back_to_a_generic_notice_on_unparseable_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(502)
        .with_body("Bad Gateway")
        .create();

    let backend = OpenRouter::with_url(server.url());
    let res = backend
        .complete(&[Message::new(Role::User, "Hello?")])
        .await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Failed to get response");
}

#[tokio::test]
async fn it_fails_on_empty_choices() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create();

    let backend = OpenRouter::with_url(server.url());
    let res = backend
        .complete(&[Message::new(Role::User, "Hello?")])
        .await;

    mock.assert();
    assert!(res.is_err());
}
