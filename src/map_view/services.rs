use crate::annotations::models::LatLng;
use crate::app_context::{AppContext, RequestContext};
use crate::auth::extractors::Caller;
use crate::map_view::models::DraftFields;
use crate::map_view::responses::{MapViewError, MapViewResponse, MapViewSnapshot};
use crate::map_view::state::{MapEvent, MapView, Outcome};

pub struct MountViewHttpHandler<'c> {
    app_context: AppContext,
    caller: &'c Caller,
}

impl<'c> MountViewHttpHandler<'c> {
    pub fn new(app_context: AppContext, caller: &'c Caller) -> Self {
        Self {
            app_context,
            caller,
        }
    }

    pub async fn mount(&self) -> MapViewResponse {
        let settings = &self.app_context.settings;
        let view = MapView::new(settings.viewport, settings.append_submitted_markers);
        let view_id = self.app_context.views.mount(view).await;
        tracing::info!(task = "map_view", view_id = %view_id, "Mounted a map view.");
        let request_context = RequestContext {
            view_id,
            caller: self.caller.clone(),
        };
        MapViewHttpHandler::new(self.app_context.clone(), &request_context)
            .reload()
            .await
    }
}

pub struct MapViewHttpHandler<'rc> {
    app_context: AppContext,
    request_context: &'rc RequestContext,
}

impl<'rc> MapViewHttpHandler<'rc> {
    pub fn new(app_context: AppContext, request_context: &'rc RequestContext) -> Self {
        Self {
            app_context,
            request_context,
        }
    }

    pub async fn snapshot(&self) -> MapViewResponse {
        let snapshot = self
            .app_context
            .views
            .read(self.view_id(), |view| self.snapshot_of(view))
            .await;
        match snapshot {
            Some(snapshot) => MapViewResponse::ok(snapshot),
            None => MapViewResponse::view_not_found(),
        }
    }

    pub async fn unmount(&self) -> MapViewResponse {
        if !self.app_context.views.unmount(self.view_id()).await {
            return MapViewResponse::view_not_found();
        }
        tracing::info!(task = "map_view", view_id = %self.view_id(), "Unmounted a map view.");
        MapViewResponse {
            error: false,
            error_code: None,
            view: None,
            notice: None,
        }
    }

    pub async fn click(&self, clicked: LatLng) -> MapViewResponse {
        self.dispatch(MapEvent::MapClicked(clicked)).await
    }

    pub async fn edit_draft(&self, fields: DraftFields) -> MapViewResponse {
        self.dispatch(MapEvent::DraftEdited(fields)).await
    }

    pub async fn close(&self) -> MapViewResponse {
        self.dispatch(MapEvent::CloseRequested).await
    }

    pub async fn reload(&self) -> MapViewResponse {
        if !self.app_context.views.is_mounted(self.view_id()).await {
            return MapViewResponse::view_not_found();
        }
        let listing = self
            .app_context
            .annotations
            .list(&self.request_context.caller)
            .await;
        let snapshot = self
            .app_context
            .views
            .update(self.view_id(), |view| {
                view.markers_loaded(listing);
                self.snapshot_of(view)
            })
            .await;
        match snapshot {
            Some(snapshot) => MapViewResponse::ok(snapshot),
            None => {
                self.log_dropped_completion("list");
                MapViewResponse::view_not_found()
            }
        }
    }

    pub async fn submit(&self) -> MapViewResponse {
        let requested = self
            .app_context
            .views
            .update(self.view_id(), |view| {
                (view.apply(MapEvent::SubmitRequested), self.snapshot_of(view))
            })
            .await;
        let (submission, insert) = match requested {
            None => return MapViewResponse::view_not_found(),
            Some((Outcome::Insert(submission, insert), _)) => (submission, insert),
            Some((Outcome::Rejected(rejection), snapshot)) => {
                return MapViewResponse::failed(rejection.into(), Some(snapshot));
            }
            Some((_, snapshot)) => return MapViewResponse::ok(snapshot),
        };

        let inserted = self
            .app_context
            .annotations
            .insert(&insert, &self.request_context.caller)
            .await;
        let event = match &inserted {
            Ok(()) => MapEvent::SubmitSucceeded(submission),
            Err(err) => MapEvent::SubmitFailed(submission, err.to_string()),
        };
        let completed = self
            .app_context
            .views
            .update(self.view_id(), |view| (view.apply(event), self.snapshot_of(view)))
            .await;
        let Some((outcome, snapshot)) = completed else {
            self.log_dropped_completion("insert");
            return MapViewResponse::view_not_found();
        };

        tracing::info!(
            task = "map_view",
            view_id = %self.view_id(),
            submission,
            submitted = inserted.is_ok(),
            "Submission finished."
        );
        let response = match inserted {
            Ok(()) => MapViewResponse::ok(snapshot),
            Err(_) => MapViewResponse::failed(MapViewError::SubmissionFailed, Some(snapshot)),
        };
        match outcome {
            Outcome::Acknowledge(notice) => response.with_notice(notice),
            _ => response,
        }
    }

    async fn dispatch(&self, event: MapEvent) -> MapViewResponse {
        let applied = self
            .app_context
            .views
            .update(self.view_id(), |view| (view.apply(event), self.snapshot_of(view)))
            .await;
        match applied {
            None => MapViewResponse::view_not_found(),
            Some((Outcome::Rejected(rejection), snapshot)) => {
                MapViewResponse::failed(rejection.into(), Some(snapshot))
            }
            Some((Outcome::Acknowledge(notice), snapshot)) => {
                MapViewResponse::ok(snapshot).with_notice(notice)
            }
            Some((_, snapshot)) => MapViewResponse::ok(snapshot),
        }
    }

    fn view_id(&self) -> &str {
        &self.request_context.view_id
    }

    fn snapshot_of(&self, view: &MapView) -> MapViewSnapshot {
        MapViewSnapshot::of(self.view_id(), view, &self.app_context.settings.login_url)
    }

    fn log_dropped_completion(&self, operation: &str) {
        tracing::info!(
            task = "map_view",
            view_id = %self.view_id(),
            operation,
            "The view was unmounted while the backend call was pending, dropping the result."
        );
    }
}
