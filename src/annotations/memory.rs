use crate::annotations::errors::{AnnotationError, Result};
use crate::annotations::models::{coordinate_from_text, Annotation, NewAnnotation};
use crate::annotations::store::AnnotationStore;
use crate::auth::extractors::Caller;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<Annotation>>>,
    next_id: Arc<AtomicU64>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_rows(rows: Vec<Annotation>) -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(rows.len() as u64)),
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl AnnotationStore for MemoryStore {
    async fn insert(&self, annotation: &NewAnnotation, caller: &Caller) -> Result<()> {
        // Mirrors a numeric column rejecting text that isn't a number.
        let parse = |raw: &str| {
            coordinate_from_text(raw).ok_or_else(|| {
                AnnotationError::WriteFailure(format!(
                    "invalid input syntax for type double precision: \"{raw}\""
                ))
            })
        };
        let lat = parse(&annotation.lat)?;
        let lng = parse(&annotation.lng)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.rows.write().await.push(Annotation {
            id: Some(id.to_string()),
            lat,
            lng,
            message: annotation.message.clone(),
            author_id: caller.access_token.as_ref().map(|_| String::from("authenticated")),
            created_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn list(&self, _caller: &Caller) -> Result<Vec<Annotation>> {
        Ok(self.rows.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_annotation(lat: &str, lng: &str, message: &str) -> NewAnnotation {
        NewAnnotation {
            lat: lat.to_string(),
            lng: lng.to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn inserted_rows_are_listed_with_backend_fields() {
        let store = MemoryStore::default();

        store
            .insert(&new_annotation("31.5", "121.5", "测试"), &Caller::anonymous())
            .await
            .unwrap();
        store
            .insert(&new_annotation("1", "481.5", "x"), &Caller::with_token("t"))
            .await
            .unwrap();

        let rows = store.list(&Caller::anonymous()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_deref(), Some("1"));
        assert_eq!(rows[0].message, "测试");
        assert!(rows[0].author_id.is_none());
        assert!(rows[0].created_at.is_some());
        assert_eq!(rows[1].id.as_deref(), Some("2"));
        assert_eq!(rows[1].lng, 481.5);
        assert_eq!(rows[1].author_id.as_deref(), Some("authenticated"));
    }

    #[tokio::test]
    async fn non_numeric_coordinates_fail_the_insert() {
        let store = MemoryStore::default();

        let result = store
            .insert(&new_annotation("abc", "121.5", "测试"), &Caller::anonymous())
            .await;

        assert_eq!(
            result,
            Err(AnnotationError::WriteFailure(String::from(
                "invalid input syntax for type double precision: \"abc\""
            )))
        );
        assert_eq!(store.row_count().await, 0);
    }

    #[tokio::test]
    async fn non_finite_coordinates_fail_the_insert() {
        let store = MemoryStore::default();

        for (lat, lng) in [("NaN", "121.5"), ("31.5", "inf"), ("-infinity", "1")] {
            let result = store
                .insert(&new_annotation(lat, lng, "x"), &Caller::anonymous())
                .await;
            assert!(
                matches!(result, Err(AnnotationError::WriteFailure(_))),
                "{lat}, {lng} should not be stored"
            );
        }
        assert_eq!(store.row_count().await, 0);
    }
}
