use crate::annotations::models::LatLng;
use crate::annotations::store::SharedAnnotationStore;
use crate::annotations::{self, Backend};
use crate::auth::extractors::Caller;
use crate::cli::Args;
use crate::map_view::models::Viewport;
use crate::map_view::storage::HashMapViewsStorage;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppContext {
    pub annotations: SharedAnnotationStore,
    pub views: HashMapViewsStorage,
    pub settings: Arc<Settings>,
}

#[derive(Debug)]
pub struct Settings {
    pub viewport: Viewport,
    pub login_url: String,
    pub append_submitted_markers: bool,
    pub persistent_backend: bool,
}

pub struct RequestContext {
    pub view_id: String,
    pub caller: Caller,
}

pub fn init(args: &Args) -> AppContext {
    let Backend { store, persistent } = annotations::init(args);
    with_store(args, store, persistent)
}

pub fn with_store(args: &Args, store: SharedAnnotationStore, persistent: bool) -> AppContext {
    let settings = Settings {
        viewport: Viewport {
            center: LatLng {
                lat: args.initial_lat,
                lng: args.initial_lng,
            },
            zoom: args.initial_zoom,
        },
        login_url: args.login_url.clone(),
        append_submitted_markers: args.append_submitted_markers,
        persistent_backend: persistent,
    };
    AppContext {
        annotations: store,
        views: HashMapViewsStorage::new(
            Duration::from_secs(args.view_idle_timeout_secs),
            args.max_mounted_views,
        ),
        settings: Arc::new(settings),
    }
}
