use serde::Serialize;

use crate::insights::InsightInfo;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub insights: Vec<InsightInfo>,
}
