//! Minimal client for an OpenAI-compatible Chat Completions API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{bearer_header, Context};
use crate::error::{ConfigError, SummarizeError};

pub struct ChatClient {
    client: Client,
    base_url: String,
    auth: HeaderValue,
}

impl ChatClient {
    pub fn new(ctx: &Context) -> Self {
        Self {
            client: ctx.http().clone(),
            base_url: trim_base_url(&ctx.config().llm.base_url),
            auth: ctx.auth_header().clone(),
        }
    }

    pub fn with_parts(client: Client, base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            base_url: trim_base_url(base_url),
            auth: bearer_header(api_key)?,
        })
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }

    /// Send a single user message and return the first choice's text.
    pub async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, SummarizeError> {
        let body = ChatRequest {
            model,
            temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending chat completion request to model {}", model);
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.auth_headers())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(SummarizeError::Status { status, body });
        }

        let parsed: ChatResponse = resp.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(SummarizeError::EmptyResponse)?;
        choice.message.content.ok_or(SummarizeError::NoContent)
    }

    /// Identifiers of every model the service exposes, in the order returned.
    pub async fn list_models(&self) -> Result<Vec<String>, SummarizeError> {
        let resp = self
            .client
            .get(format!("{}/models", self.base_url))
            .headers(self.auth_headers())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(SummarizeError::Status { status, body });
        }

        let parsed: ModelList = resp.json().await?;
        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }
}

fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    id: String,
}
