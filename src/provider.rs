use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

/// One chat-completion call asking the provider for a JSON object.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Debug)]
pub enum ProviderError {
    MissingCredential,
    InvalidCredential,
    Timeout,
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    MalformedEnvelope(reqwest::Error),
    EmptyChoices,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "inference credential is not configured"),
            Self::InvalidCredential => write!(f, "inference credential is not a valid header value"),
            Self::Timeout => write!(f, "inference request timed out"),
            Self::Transport(err) => write!(f, "failed to send inference request: {err}"),
            Self::Status { status, body } => {
                write!(f, "inference request failed ({status}): {body}")
            }
            Self::MalformedEnvelope(err) => {
                write!(f, "inference response envelope was malformed: {err}")
            }
            Self::EmptyChoices => write!(f, "inference response contained no choices"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) | Self::MalformedEnvelope(err) => Some(err),
            _ => None,
        }
    }
}

/// External text-generation service.
///
/// Implementations must check their credential in `complete` before any network I/O and
/// return [`ProviderError::MissingCredential`] when it is absent.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
}

/// Groq's OpenAI-compatible chat-completions API.
pub struct GroqClient {
    cfg: ProviderConfig,
    http: reqwest::Client,
}

impl GroqClient {
    pub fn new(cfg: ProviderConfig) -> Self {
        Self {
            cfg,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl InferenceProvider for GroqClient {
    fn is_configured(&self) -> bool {
        self.cfg.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ProviderError::InvalidCredential)?;
        headers.insert(AUTHORIZATION, bearer);

        let body = ChatCompletionBody {
            model: &self.cfg.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let fut = async move {
            let response = self
                .http
                .post(self.endpoint())
                .headers(headers)
                .json(&body)
                .send()
                .await
                .map_err(ProviderError::Transport)?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unable to read response body>".to_string());
                return Err(ProviderError::Status { status, body });
            }

            response
                .json::<ChatCompletion>()
                .await
                .map_err(ProviderError::MalformedEnvelope)
        };

        let completion = timeout(Duration::from_millis(self.cfg.timeout_ms), fut)
            .await
            .map_err(|_| ProviderError::Timeout)??;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyChoices)?;

        Ok(choice
            .message
            .content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "{}".to_string()))
    }
}
