use crate::app_context::{AppContext, RequestContext};
use crate::auth::extractors::Caller;
use crate::map_view::requests::{DraftEditRequest, MapClickRequest};
use crate::map_view::responses::MapViewResponse;
use crate::map_view::services::{MapViewHttpHandler, MountViewHttpHandler};
use axum::extract::{Path, State};
use axum::response::Json;

#[axum::debug_handler]
pub async fn mount(
    caller: Caller,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let response = MountViewHttpHandler::new(app_context, &caller).mount().await;
    Json(response)
}

#[axum::debug_handler]
pub async fn snapshot(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .snapshot()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn unmount(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .unmount()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn click(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
    Json(request): Json<MapClickRequest>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .click(request.into())
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn edit_draft(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
    Json(request): Json<DraftEditRequest>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .edit_draft(request.into())
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn submit(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .submit()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn close(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .close()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn reload(
    caller: Caller,
    Path(view_id): Path<String>,
    State(app_context): State<AppContext>,
) -> Json<MapViewResponse> {
    let request_context = RequestContext { view_id, caller };
    let response = MapViewHttpHandler::new(app_context, &request_context)
        .reload()
        .await;
    Json(response)
}
