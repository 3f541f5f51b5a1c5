use crate::annotations::models::{LatLng, NewAnnotation};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftFields {
    pub lat: String,
    pub lng: String,
    pub message: String,
}

impl DraftFields {
    pub fn from_click(clicked: LatLng) -> Self {
        Self {
            lat: clicked.lat.to_string(),
            lng: clicked.lng.to_string(),
            message: String::new(),
        }
    }

    pub fn first_empty(&self) -> Option<DraftField> {
        [
            (DraftField::Message, &self.message),
            (DraftField::Latitude, &self.lat),
            (DraftField::Longitude, &self.lng),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl From<&DraftFields> for NewAnnotation {
    fn from(fields: &DraftFields) -> Self {
        NewAnnotation {
            lat: fields.lat.clone(),
            lng: fields.lng.clone(),
            message: fields.message.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DraftField {
    Message,
    Latitude,
    Longitude,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub clicked: LatLng,
    pub fields: DraftFields,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn submitted() -> Self {
        Self {
            kind: NoticeKind::Success,
            text: String::from("提交成功！"),
        }
    }

    pub fn submission_failed(reason: &str) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: format!("提交失败: {reason}"),
        }
    }
}
