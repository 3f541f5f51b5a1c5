use crate::annotations::models::Annotation;
use crate::map_view::models::{DraftField, DraftFields, Notice, Viewport};
use crate::map_view::state::{MapView, Panel, Rejection};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewResponse {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<MapViewError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<MapViewSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl MapViewResponse {
    pub fn ok(view: MapViewSnapshot) -> Self {
        Self {
            error: false,
            error_code: None,
            view: Some(view),
            notice: None,
        }
    }

    pub fn failed(error_code: MapViewError, view: Option<MapViewSnapshot>) -> Self {
        Self {
            error: true,
            error_code: Some(error_code),
            view,
            notice: None,
        }
    }

    pub fn view_not_found() -> Self {
        Self::failed(MapViewError::ViewNotFound, None)
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapViewError {
    ViewNotFound,
    EmptyMessage,
    EmptyLatitude,
    EmptyLongitude,
    NoDraftOpen,
    AlreadySubmitting,
    SubmissionFailed,
}

impl From<Rejection> for MapViewError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::EmptyField(DraftField::Message) => MapViewError::EmptyMessage,
            Rejection::EmptyField(DraftField::Latitude) => MapViewError::EmptyLatitude,
            Rejection::EmptyField(DraftField::Longitude) => MapViewError::EmptyLongitude,
            Rejection::NoDraftOpen => MapViewError::NoDraftOpen,
            Rejection::AlreadySubmitting => MapViewError::AlreadySubmitting,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewSnapshot {
    pub view_id: String,
    pub viewport: Viewport,
    pub markers: Vec<Annotation>,
    pub panel: PanelSnapshot,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    pub open: bool,
    pub submitting: bool,
    pub description: String,
    pub fields: DraftFields,
    pub login_notice: String,
}

impl MapViewSnapshot {
    pub fn of(view_id: &str, view: &MapView, login_url: &str) -> Self {
        let panel = PanelSnapshot {
            open: !matches!(view.panel(), Panel::Idle),
            submitting: matches!(view.panel(), Panel::Submitting(..)),
            description: view.description(),
            fields: view
                .draft()
                .map(|draft| draft.fields.clone())
                .unwrap_or_default(),
            login_notice: format!("提交信息前请先登录：{login_url}"),
        };
        Self {
            view_id: view_id.to_string(),
            viewport: view.viewport(),
            markers: view.markers().to_vec(),
            panel,
        }
    }
}
