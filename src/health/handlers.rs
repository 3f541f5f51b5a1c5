use crate::app_context::AppContext;
use crate::health::responses::HealthCheckResponse;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn healthcheck(State(app_context): State<AppContext>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        error: false,
        persistent_backend: app_context.settings.persistent_backend,
        mounted_views: app_context.views.count().await,
    })
}
