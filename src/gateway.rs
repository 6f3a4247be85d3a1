use std::error::Error;
use std::fmt;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::insights::{FieldError, Fields, Insight};
use crate::provider::{CompletionRequest, InferenceProvider, ProviderError};
use crate::schema::{conform, SchemaViolation};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "GROQ_API_KEY is not configured. Set it in the service environment and restart.";

#[derive(Debug)]
pub enum GatewayError {
    BadRequest(FieldError),
    ServiceUnavailable,
    Upstream(ProviderError),
    InvalidJson(serde_json::Error),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(err) => write!(f, "{err}"),
            Self::ServiceUnavailable => write!(f, "{MISSING_CREDENTIAL_MESSAGE}"),
            Self::Upstream(err) => write!(f, "AI service failed to process request: {err}"),
            Self::InvalidJson(err) => write!(f, "AI service returned invalid JSON: {err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BadRequest(err) => Some(err),
            Self::ServiceUnavailable => None,
            Self::Upstream(err) => Some(err),
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<FieldError> for GatewayError {
    fn from(err: FieldError) -> Self {
        Self::BadRequest(err)
    }
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential => Self::ServiceUnavailable,
            other => Self::Upstream(other),
        }
    }
}

/// A successful insight: either what the model said, or the fallback that replaced it.
#[derive(Debug)]
pub enum Outcome<T> {
    Model(T),
    Fallback { value: T, violation: SchemaViolation },
}

impl<T> Outcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Model(value) | Self::Fallback { value, .. } => value,
        }
    }
}

/// Runs one insight request end to end against `provider`.
pub async fn run_insight<I: Insight>(
    provider: &dyn InferenceProvider,
    body: &Value,
) -> Result<Outcome<I>, GatewayError> {
    let fields = Fields::extract(body, I::REQUIRED, I::OPTIONAL)?;

    if !provider.is_configured() {
        return Err(GatewayError::ServiceUnavailable);
    }

    let request = CompletionRequest {
        system_prompt: I::SYSTEM_PROMPT.to_string(),
        user_prompt: I::user_prompt(&fields),
    };

    let text = provider.complete(&request).await.map_err(|err| {
        error!(insight = I::NAME, error = %err, "inference call failed");
        GatewayError::from(err)
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|err| {
        error!(insight = I::NAME, error = %err, "inference output is not JSON");
        GatewayError::InvalidJson(err)
    })?;

    match conform::<I>(value) {
        Ok(parsed) => {
            debug!(insight = I::NAME, "inference output validated");
            Ok(Outcome::Model(parsed))
        }
        Err(violation) => {
            warn!(insight = I::NAME, %violation, "inference output failed validation; using fallback");
            Ok(Outcome::Fallback {
                value: I::fallback(),
                violation,
            })
        }
    }
}
