use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::gateway::{run_insight, GatewayError};
use crate::insights::{catalog, Insight};
use crate::AppState;

use super::models::{CatalogResponse, ErrorResponse, HealthResponse};

/// Response header telling the page whether it got model output or the fallback.
pub const INSIGHT_SOURCE_HEADER: &str = "x-insight-source";

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn insight<I: Insight>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    let outcome = run_insight::<I>(state.provider.as_ref(), &body)
        .await
        .map_err(reject)?;

    let source = if outcome.is_fallback() {
        "fallback"
    } else {
        "model"
    };

    Ok((
        StatusCode::OK,
        [(INSIGHT_SOURCE_HEADER, source)],
        Json(outcome.into_inner()),
    )
        .into_response())
}

fn reject(err: GatewayError) -> ApiError {
    let status = match &err {
        GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
        GatewayError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::Upstream(_) | GatewayError::InvalidJson(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider_configured: state.provider.is_configured(),
    })
}

pub async fn insight_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        insights: catalog(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
