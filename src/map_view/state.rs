use crate::annotations::errors::AnnotationError;
use crate::annotations::models::{coordinate_from_text, Annotation, LatLng, NewAnnotation};
use crate::map_view::models::{Draft, DraftField, DraftFields, Notice, Viewport};
use std::mem;

pub type SubmissionId = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Idle,
    DraftOpen(Draft),
    Submitting(SubmissionId, Draft),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    MapClicked(LatLng),
    DraftEdited(DraftFields),
    SubmitRequested,
    SubmitSucceeded(SubmissionId),
    SubmitFailed(SubmissionId, String),
    CloseRequested,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Ignored,
    Changed,
    Insert(SubmissionId, NewAnnotation),
    Rejected(Rejection),
    Acknowledge(Notice),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyField(DraftField),
    NoDraftOpen,
    AlreadySubmitting,
}

#[derive(Clone, Debug)]
pub struct MapView {
    viewport: Viewport,
    markers: Vec<Annotation>,
    panel: Panel,
    append_submitted_markers: bool,
    submissions: SubmissionId,
}

impl MapView {
    pub fn new(viewport: Viewport, append_submitted_markers: bool) -> Self {
        Self {
            viewport,
            markers: Vec::new(),
            panel: Panel::Idle,
            append_submitted_markers,
            submissions: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn markers(&self) -> &[Annotation] {
        &self.markers
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.panel {
            Panel::Idle => None,
            Panel::DraftOpen(draft) | Panel::Submitting(_, draft) => Some(draft),
        }
    }

    pub fn description(&self) -> String {
        match self.draft() {
            Some(Draft { clicked, .. }) => {
                format!("你点击了: 纬度 {}, 经度 {}", clicked.lat, clicked.lng)
            }
            None => String::from("点击地图任意位置提交信息。"),
        }
    }

    pub fn markers_loaded(&mut self, listing: Result<Vec<Annotation>, AnnotationError>) {
        match listing {
            Ok(markers) => self.markers = markers,
            Err(err) => {
                tracing::warn!(task = "map_view", "Showing no markers. {err}");
                self.markers.clear();
            }
        }
    }

    pub fn apply(&mut self, event: MapEvent) -> Outcome {
        let panel = mem::replace(&mut self.panel, Panel::Idle);
        let (panel, outcome) = match (panel, event) {
            (panel @ Panel::Submitting(..), MapEvent::MapClicked(_)) => (panel, Outcome::Ignored),
            (_, MapEvent::MapClicked(clicked)) => {
                let draft = Draft {
                    clicked,
                    fields: DraftFields::from_click(clicked),
                };
                (Panel::DraftOpen(draft), Outcome::Changed)
            }

            (Panel::DraftOpen(draft), MapEvent::DraftEdited(fields)) => {
                (Panel::DraftOpen(Draft { fields, ..draft }), Outcome::Changed)
            }
            (panel, MapEvent::DraftEdited(_)) => (panel, Outcome::Ignored),

            (Panel::Idle, MapEvent::SubmitRequested) => {
                (Panel::Idle, Outcome::Rejected(Rejection::NoDraftOpen))
            }
            (panel @ Panel::Submitting(..), MapEvent::SubmitRequested) => {
                (panel, Outcome::Rejected(Rejection::AlreadySubmitting))
            }
            (Panel::DraftOpen(draft), MapEvent::SubmitRequested) => {
                match draft.fields.first_empty() {
                    Some(field) => (
                        Panel::DraftOpen(draft),
                        Outcome::Rejected(Rejection::EmptyField(field)),
                    ),
                    None => {
                        self.submissions += 1;
                        let insert = NewAnnotation::from(&draft.fields);
                        (
                            Panel::Submitting(self.submissions, draft),
                            Outcome::Insert(self.submissions, insert),
                        )
                    }
                }
            }

            (Panel::Submitting(current, draft), MapEvent::SubmitSucceeded(id))
                if current == id =>
            {
                if self.append_submitted_markers {
                    self.append_marker(&draft);
                }
                (Panel::Idle, Outcome::Acknowledge(Notice::submitted()))
            }
            (Panel::Submitting(current, draft), MapEvent::SubmitFailed(id, reason))
                if current == id =>
            {
                (
                    Panel::DraftOpen(draft),
                    Outcome::Acknowledge(Notice::submission_failed(&reason)),
                )
            }
            // The panel was closed while the insert was in flight, whatever it shows now
            // belongs to a newer click.
            (panel, MapEvent::SubmitSucceeded(_)) => {
                (panel, Outcome::Acknowledge(Notice::submitted()))
            }
            (panel, MapEvent::SubmitFailed(_, reason)) => (
                panel,
                Outcome::Acknowledge(Notice::submission_failed(&reason)),
            ),

            (_, MapEvent::CloseRequested) => (Panel::Idle, Outcome::Changed),
        };
        self.panel = panel;
        outcome
    }

    fn append_marker(&mut self, draft: &Draft) {
        let lat = coordinate_from_text(&draft.fields.lat);
        let lng = coordinate_from_text(&draft.fields.lng);
        match (lat, lng) {
            (Some(lat), Some(lng)) => self.markers.push(Annotation {
                id: None,
                lat,
                lng,
                message: draft.fields.message.clone(),
                author_id: None,
                created_at: None,
            }),
            _ => tracing::debug!(
                task = "map_view",
                "Not showing the submitted annotation before a reload, its coordinates aren't numbers."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_view::models::NoticeKind;

    fn viewport() -> Viewport {
        Viewport {
            center: LatLng {
                lat: 31.1417539449555,
                lng: 481.4964079856873,
            },
            zoom: 13,
        }
    }

    fn click(lat: f64, lng: f64) -> MapEvent {
        MapEvent::MapClicked(LatLng { lat, lng })
    }

    fn edit(lat: &str, lng: &str, message: &str) -> MapEvent {
        MapEvent::DraftEdited(DraftFields {
            lat: lat.to_string(),
            lng: lng.to_string(),
            message: message.to_string(),
        })
    }

    fn marker(message: &str) -> Annotation {
        Annotation {
            id: Some(String::from("1")),
            lat: 31.2,
            lng: 121.4,
            message: message.to_string(),
            author_id: None,
            created_at: None,
        }
    }

    #[test]
    fn draft_follows_the_most_recent_click() {
        let mut view = MapView::new(viewport(), false);
        assert!(view.draft().is_none());

        for (lat, lng) in [(31.5, 121.5), (-12.25, 0.5), (89.0, 481.0)] {
            assert_eq!(view.apply(click(lat, lng)), Outcome::Changed);
            let draft = view.draft().unwrap();
            assert_eq!(draft.clicked, LatLng { lat, lng });
            assert_eq!(draft.fields.lat, lat.to_string());
            assert_eq!(draft.fields.lng, lng.to_string());
            assert!(draft.fields.message.is_empty());
        }
        assert!(matches!(view.panel(), Panel::DraftOpen(_)));
    }

    #[test]
    fn reclicking_discards_the_typed_message() {
        let mut view = MapView::new(viewport(), false);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.5", "121.5", "half written"));

        view.apply(click(31.6, 121.6));

        assert_eq!(view.draft().unwrap().fields.message, "");
    }

    #[test]
    fn closing_returns_to_idle_from_any_panel_state() {
        let mut view = MapView::new(viewport(), false);
        assert_eq!(view.apply(MapEvent::CloseRequested), Outcome::Changed);
        assert_eq!(view.panel(), &Panel::Idle);

        view.apply(click(1.0, 2.0));
        view.apply(MapEvent::CloseRequested);
        assert_eq!(view.panel(), &Panel::Idle);

        view.apply(click(1.0, 2.0));
        view.apply(edit("1", "2", "note"));
        view.apply(MapEvent::SubmitRequested);
        view.apply(MapEvent::CloseRequested);
        assert_eq!(view.panel(), &Panel::Idle);
        assert!(view.draft().is_none());
    }

    #[test]
    fn empty_fields_are_rejected_before_any_insert() {
        let mut view = MapView::new(viewport(), false);
        view.apply(click(31.5, 121.5));

        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Rejected(Rejection::EmptyField(DraftField::Message))
        );

        view.apply(edit("", "121.5", "测试"));
        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Rejected(Rejection::EmptyField(DraftField::Latitude))
        );

        view.apply(edit("31.5", "  ", "测试"));
        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Rejected(Rejection::EmptyField(DraftField::Longitude))
        );
        assert!(matches!(view.panel(), Panel::DraftOpen(_)));
    }

    #[test]
    fn submitting_without_a_draft_is_rejected() {
        let mut view = MapView::new(viewport(), false);

        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Rejected(Rejection::NoDraftOpen)
        );
    }

    #[test]
    fn submit_emits_the_insert_and_blocks_a_second_submit() {
        let mut view = MapView::new(viewport(), false);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.5", "121.5", "测试"));

        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Insert(
                1,
                NewAnnotation {
                    lat: String::from("31.5"),
                    lng: String::from("121.5"),
                    message: String::from("测试"),
                }
            )
        );
        assert!(matches!(view.panel(), Panel::Submitting(1, _)));
        assert_eq!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Rejected(Rejection::AlreadySubmitting)
        );
        assert_eq!(view.apply(click(0.0, 0.0)), Outcome::Ignored);
        assert_eq!(view.apply(edit("0", "0", "changed")), Outcome::Ignored);
        assert_eq!(view.draft().unwrap().fields.message, "测试");
    }

    #[test]
    fn success_closes_the_panel_and_keeps_markers_until_reload() {
        let mut view = MapView::new(viewport(), false);
        view.markers_loaded(Ok(vec![marker("old")]));
        view.apply(click(31.5, 121.5));
        assert_eq!(view.description(), "你点击了: 纬度 31.5, 经度 121.5");
        view.apply(edit("31.5", "121.5", "测试"));
        view.apply(MapEvent::SubmitRequested);

        let outcome = view.apply(MapEvent::SubmitSucceeded(1));

        assert_eq!(outcome, Outcome::Acknowledge(Notice::submitted()));
        assert_eq!(view.panel(), &Panel::Idle);
        assert_eq!(view.markers(), &[marker("old")]);
        assert_eq!(view.description(), "点击地图任意位置提交信息。");
    }

    #[test]
    fn success_appends_the_marker_when_enabled() {
        let mut view = MapView::new(viewport(), true);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.5", "121.5", "测试"));
        view.apply(MapEvent::SubmitRequested);

        view.apply(MapEvent::SubmitSucceeded(1));

        assert_eq!(view.markers().len(), 1);
        assert_eq!((view.markers()[0].lat, view.markers()[0].lng), (31.5, 121.5));
        assert_eq!(view.markers()[0].message, "测试");
    }

    #[test]
    fn non_finite_coordinates_are_not_appended() {
        let mut view = MapView::new(viewport(), true);
        view.apply(click(31.5, 121.5));
        view.apply(edit("NaN", "inf", "x"));
        view.apply(MapEvent::SubmitRequested);

        view.apply(MapEvent::SubmitSucceeded(1));

        assert!(view.markers().is_empty());
        assert_eq!(view.panel(), &Panel::Idle);
    }

    #[test]
    fn late_success_leaves_a_newer_draft_open() {
        let mut view = MapView::new(viewport(), false);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.5", "121.5", "测试"));
        view.apply(MapEvent::SubmitRequested);
        view.apply(MapEvent::CloseRequested);
        view.apply(click(1.0, 1.0));

        let outcome = view.apply(MapEvent::SubmitSucceeded(1));

        assert_eq!(outcome, Outcome::Acknowledge(Notice::submitted()));
        assert!(matches!(view.panel(), Panel::DraftOpen(_)));
        assert_eq!(view.draft().unwrap().clicked, LatLng { lat: 1.0, lng: 1.0 });
    }

    #[test]
    fn completions_only_touch_their_own_submission() {
        let mut view = MapView::new(viewport(), true);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.5", "121.5", "A"));
        view.apply(MapEvent::SubmitRequested);
        view.apply(MapEvent::CloseRequested);
        view.apply(click(1.0, 2.0));
        view.apply(edit("1", "2", "B"));
        let Outcome::Insert(second, insert) = view.apply(MapEvent::SubmitRequested) else {
            panic!("expected the second draft to be submitted");
        };
        assert_eq!((second, insert.message.as_str()), (2, "B"));

        view.apply(MapEvent::SubmitSucceeded(1));
        assert!(matches!(view.panel(), Panel::Submitting(2, _)));
        assert!(view.markers().is_empty());

        let outcome = view.apply(MapEvent::SubmitFailed(2, String::from("rls")));

        assert_eq!(outcome, Outcome::Acknowledge(Notice::submission_failed("rls")));
        let Panel::DraftOpen(draft) = view.panel() else {
            panic!("expected the second draft to stay open");
        };
        assert_eq!(draft.fields.message, "B");
        assert_eq!(draft.fields.lng, "2");
    }

    #[test]
    fn failure_keeps_the_panel_open_with_the_entered_values() {
        let mut view = MapView::new(viewport(), false);
        view.apply(click(31.5, 121.5));
        view.apply(edit("31.50", "121.50", "测试"));
        view.apply(MapEvent::SubmitRequested);

        let outcome = view.apply(MapEvent::SubmitFailed(1, String::from("permission denied")));

        let Outcome::Acknowledge(notice) = outcome else {
            panic!("expected an acknowledgment, got {outcome:?}");
        };
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.text, "提交失败: permission denied");
        let Panel::DraftOpen(draft) = view.panel() else {
            panic!("expected the panel to stay open");
        };
        assert_eq!(draft.fields.lat, "31.50");
        assert_eq!(draft.fields.lng, "121.50");
        assert_eq!(draft.fields.message, "测试");

        assert!(matches!(
            view.apply(MapEvent::SubmitRequested),
            Outcome::Insert(2, _)
        ));
    }

    #[test]
    fn failed_listing_leaves_no_markers() {
        let mut view = MapView::new(viewport(), false);
        view.markers_loaded(Ok(vec![marker("a"), marker("b")]));

        view.markers_loaded(Err(AnnotationError::ReadFailure(String::from("timeout"))));

        assert!(view.markers().is_empty());
        assert_eq!(view.apply(click(31.5, 121.5)), Outcome::Changed);
    }
}
