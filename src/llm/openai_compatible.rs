// ABOUTME: OpenAI-compatible chat completions client used by the AI exercise selectors
// ABOUTME: One reqwest-based provider with presets for OpenAI, Groq, and local servers such as Ollama
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Every supported host speaks the `/chat/completions` dialect, so a single
//! client covers them; presets only differ in base URL, credentials, default
//! model, and capabilities.
//!
//! | Provider | Key            | Model override | Default model              |
//! |----------|----------------|----------------|----------------------------|
//! | `openai` | `OPENAI_API_KEY` | `OPENAI_MODEL` | `gpt-4o-mini`            |
//! | `groq`   | `GROQ_API_KEY` | `GROQ_MODEL`   | `llama-3.3-70b-versatile`  |
//! | `local`  | `LOCAL_LLM_API_KEY` (optional) | `LOCAL_LLM_MODEL` | `qwen2.5:14b-instruct` |
//!
//! Local servers are reached at `LOCAL_LLM_BASE_URL` (default Ollama on
//! <http://localhost:11434/v1>).

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::LlmProviderType;
use crate::errors::{AppError, ErrorCode};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
const GROQ_MODEL_ENV: &str = "GROQ_MODEL";
const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const LOCAL_BASE_URL: &str = "http://localhost:11434/v1";
const LOCAL_BASE_URL_ENV: &str = "LOCAL_LLM_BASE_URL";
const LOCAL_API_KEY_ENV: &str = "LOCAL_LLM_API_KEY";
const LOCAL_MODEL_ENV: &str = "LOCAL_LLM_MODEL";
const LOCAL_DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Hard ceiling on a request; the selectors apply their own shorter timeout
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Upstream error bodies are cut to this many characters in messages
const ERROR_BODY_PREVIEW: usize = 200;

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReply,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    message: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Endpoint, credentials, and capabilities of one `OpenAI`-compatible host
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL up to and including the API version (`.../v1`)
    pub base_url: String,
    /// Bearer token, `None` for unauthenticated local servers
    pub api_key: Option<String>,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Identifier for logs
    pub provider_name: &'static str,
    /// Name used in error messages
    pub display_name: &'static str,
    /// Supported features
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Hosted `OpenAI` API
    #[must_use]
    pub fn openai(api_key: impl Into<String>, model: &str) -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: model.to_owned(),
            provider_name: "openai",
            display_name: "OpenAI",
            capabilities: LlmCapabilities::hosted(),
        }
    }

    /// Groq's `OpenAI`-compatible endpoint
    #[must_use]
    pub fn groq(api_key: impl Into<String>, model: &str) -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: model.to_owned(),
            provider_name: "groq",
            display_name: "Groq",
            capabilities: LlmCapabilities::hosted(),
        }
    }

    /// Local server at `base_url`; Ollama is recognised by its default port
    #[must_use]
    pub fn local(base_url: impl Into<String>, model: &str, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        let (provider_name, display_name) = if base_url.contains(":11434") {
            ("ollama", "Ollama (Local)")
        } else {
            ("local", "Local LLM")
        };
        Self {
            base_url,
            api_key,
            default_model: model.to_owned(),
            provider_name,
            display_name,
            capabilities: LlmCapabilities::SYSTEM_MESSAGES,
        }
    }

    /// Preset for `provider_type` filled from its environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when a hosted provider has no API key.
    pub fn from_env(provider_type: LlmProviderType) -> Result<Self, AppError> {
        match provider_type {
            LlmProviderType::OpenAi => Ok(Self::openai(
                required_env(OPENAI_API_KEY_ENV)?,
                &env_or(OPENAI_MODEL_ENV, OPENAI_DEFAULT_MODEL),
            )),
            LlmProviderType::Groq => Ok(Self::groq(
                required_env(GROQ_API_KEY_ENV)?,
                &env_or(GROQ_MODEL_ENV, GROQ_DEFAULT_MODEL),
            )),
            LlmProviderType::Local => Ok(Self::local(
                env_or(LOCAL_BASE_URL_ENV, LOCAL_BASE_URL),
                &env_or(LOCAL_MODEL_ENV, LOCAL_DEFAULT_MODEL),
                env::var(LOCAL_API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            )),
        }
    }
}

fn required_env(key: &str) -> Result<String, AppError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config_missing(key))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

// ============================================================================
// Provider
// ============================================================================

/// Chat completions client for any `OpenAI`-compatible host
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")).with_source(e))?;

        info!(
            provider = config.provider_name,
            base_url = %config.base_url,
            model = %config.default_model,
            "LLM provider configured"
        );
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn wire_request<'a>(&'a self, request: &'a ChatRequest) -> WireRequest<'a> {
        WireRequest {
            model: request
                .model
                .as_deref()
                .unwrap_or(&self.config.default_model),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: (request.json_mode && self.config.capabilities.supports_json_mode())
                .then_some(ResponseFormat {
                    kind: "json_object",
                }),
        }
    }

    fn send_error(&self, e: &reqwest::Error) -> AppError {
        error!(provider = self.config.provider_name, error = %e, "LLM request failed");
        if e.is_connect() || e.is_timeout() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!(
                    "Cannot reach {} at {}",
                    self.config.display_name, self.config.base_url
                ),
            )
        } else {
            AppError::external_service(self.config.display_name, format!("Request failed: {e}"))
        }
    }
}

/// Map a non-success status and body to an `AppError`
fn status_error(service: &str, status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<WireErrorBody>(body).map_or_else(
        |_| body.chars().take(ERROR_BODY_PREVIEW).collect(),
        |parsed| parsed.error.message,
    );

    match status.as_u16() {
        401 | 403 => AppError::new(
            ErrorCode::ExternalAuthFailed,
            format!("{service} rejected the API key: {detail}"),
        ),
        429 => AppError::new(
            ErrorCode::ExternalRateLimited,
            format!("{service} rate limit reached: {detail}"),
        ),
        400 | 422 => AppError::invalid_input(format!("{service} rejected the request: {detail}")),
        404 => AppError::not_found(format!("{service} model or endpoint ({detail})")),
        502..=504 => AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{service} is not responding ({status})"),
        ),
        _ => AppError::external_service(service, format!("HTTP {status}: {detail}")),
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = self.config.provider_name))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = self.wire_request(request);
        debug!(
            model = body.model,
            messages = body.messages.len(),
            json_mode = body.response_format.is_some(),
            "Sending chat completion"
        );

        let mut http = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            http = http.bearer_auth(api_key);
        }
        let response = http.send().await.map_err(|e| self.send_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.send_error(&e))?;
        if !status.is_success() {
            return Err(status_error(self.config.display_name, status, &text));
        }

        let parsed: WireResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(
                self.config.display_name,
                format!("Unreadable completion: {e}"),
            )
        })?;
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(self.config.display_name, "Completion had no choices")
        })?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Chat completion received"
        );

        Ok(ChatResponse {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
