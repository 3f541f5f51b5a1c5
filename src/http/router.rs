use crate::app_context::AppContext;
use crate::cli::Args;
use crate::{health, http::cors, map_view, shell};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

pub fn new(args: &Args, app_context: AppContext) -> Router {
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let views_routes = Router::new()
        .route("/", post(map_view::handlers::mount))
        .route(
            "/:view_id",
            get(map_view::handlers::snapshot).delete(map_view::handlers::unmount),
        )
        .route("/:view_id/click", post(map_view::handlers::click))
        .route("/:view_id/draft", post(map_view::handlers::edit_draft))
        .route("/:view_id/submit", post(map_view::handlers::submit))
        .route("/:view_id/close", post(map_view::handlers::close))
        .route("/:view_id/reload", post(map_view::handlers::reload));

    Router::new()
        .route("/", get(shell::handlers::home))
        .route("/map", get(shell::handlers::map_page))
        .nest("/health", health_routes)
        .nest("/views", views_routes)
        .with_state(app_context)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(crate::http::middleware::tracing))
                .layer(cors_policy),
        )
}
