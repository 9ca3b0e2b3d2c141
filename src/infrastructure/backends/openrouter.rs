#[cfg(test)]
#[path = "openrouter_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::Message;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: Message,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct OpenRouter {
    url: String,
    token: String,
    site_url: String,
    site_name: String,
}

impl Default for OpenRouter {
    fn default() -> OpenRouter {
        return OpenRouter {
            url: Config::get(ConfigKey::OpenRouterURL),
            token: Config::get(ConfigKey::OpenRouterToken),
            site_url: Config::get(ConfigKey::SiteURL),
            site_name: Config::get(ConfigKey::SiteName),
        };
    }
}

#[async_trait]
impl Backend for OpenRouter {
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenRouter URL is not defined");
        }

        // A missing token is not fatal at startup; the first request fails
        // with the provider's auth error through the normal error path.
        if self.token.is_empty() {
            tracing::warn!("OpenRouter token is not set, requests will fail with an auth error");
        }

        return Ok(());
    }

    async fn complete(&self, messages: &[Message]) -> Result<Message> {
        let req = CompletionRequest {
            model: Config::get(ConfigKey::Model),
            messages: messages.to_vec(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.site_name)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(
                status = status,
                "Failed to make completion request to OpenRouter"
            );

            // The first present field of the error body is surfaced to the
            // user; an unparseable body falls back to a generic notice.
            let err = res.json::<ErrorResponse>().await.unwrap_or_default();
            let notice = err
                .message
                .or(err.error)
                .unwrap_or_else(|| return "Failed to get response".to_string());
            bail!(notice);
        }

        let body = res.json::<CompletionResponse>().await?;
        tracing::debug!(body = ?body, "Completion response");

        if body.choices.is_empty() {
            bail!("Response contained no choices");
        }

        // Only the first choice is consumed.
        return Ok(body.choices[0].message.clone());
    }
}
