mod handlers;
mod models;
mod request_tracing;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::insights::{for_each_insight, Insight};
use crate::AppState;

pub use handlers::{healthz, insight, insight_catalog, not_found, INSIGHT_SOURCE_HEADER};
pub use models::{CatalogResponse, ErrorResponse, HealthResponse};

pub fn router(state: AppState) -> Router {
    macro_rules! insight_routes {
        ($($insight:ty),+ $(,)?) => {
            Router::new()
                $(.route(<$insight as Insight>::ROUTE, post(insight::<$insight>)))+
        };
    }
    let insights: Router<AppState> = for_each_insight!(insight_routes);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/insights", get(insight_catalog))
        .merge(insights)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(middleware::from_fn(request_tracing::request_tracing_middleware))
        .with_state(state)
}
