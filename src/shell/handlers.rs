use crate::app_context::AppContext;
use crate::shell::pages;
use axum::extract::State;
use axum::response::Html;

#[axum::debug_handler]
pub async fn home(State(app_context): State<AppContext>) -> Html<String> {
    Html(pages::home(app_context.settings.persistent_backend))
}

#[axum::debug_handler]
pub async fn map_page(State(app_context): State<AppContext>) -> Html<String> {
    Html(pages::map(&app_context.settings.viewport))
}
