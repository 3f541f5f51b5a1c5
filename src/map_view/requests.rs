use crate::annotations::models::LatLng;
use crate::map_view::models::DraftFields;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MapClickRequest {
    pub lat: f64,
    pub lng: f64,
}

impl From<MapClickRequest> for LatLng {
    fn from(request: MapClickRequest) -> Self {
        LatLng {
            lat: request.lat,
            lng: request.lng,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftEditRequest {
    pub lat: String,
    pub lng: String,
    pub message: String,
}

impl From<DraftEditRequest> for DraftFields {
    fn from(request: DraftEditRequest) -> Self {
        DraftFields {
            lat: request.lat,
            lng: request.lng,
            message: request.message,
        }
    }
}
