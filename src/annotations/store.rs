use crate::annotations::errors::Result;
use crate::annotations::models::{Annotation, NewAnnotation};
use crate::auth::extractors::Caller;
use async_trait::async_trait;
use std::sync::Arc;

/// The backend table of annotations. Calls are plain request/response: no retries, no caching.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    async fn insert(&self, annotation: &NewAnnotation, caller: &Caller) -> Result<()>;

    async fn list(&self, caller: &Caller) -> Result<Vec<Annotation>>;
}

pub type SharedAnnotationStore = Arc<dyn AnnotationStore>;
