use crate::cli::Args;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn layer(args: &Args) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(&args.allowed_origins))
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
}

fn allowed_origins(configured: &[String]) -> AllowOrigin {
    if configured.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }
    let origins = configured
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring the unusable allowed origin `{origin}`.");
                None
            }
        })
        .collect::<Vec<_>>();
    AllowOrigin::list(origins)
}
