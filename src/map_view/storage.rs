use crate::map_view::state::MapView;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

struct MountedView {
    view: MapView,
    last_touched: Instant,
    touch_order: u64,
}

#[derive(Default)]
struct Views {
    mounted: HashMap<String, MountedView>,
    touches: u64,
}

impl Views {
    fn next_touch(&mut self) -> u64 {
        self.touches += 1;
        self.touches
    }

    fn evict_idle(&mut self, idle_timeout: Duration) {
        let before = self.mounted.len();
        self.mounted
            .retain(|_, mounted| mounted.last_touched.elapsed() < idle_timeout);
        let evicted = before - self.mounted.len();
        if evicted > 0 {
            tracing::info!(task = "map_view", evicted, "Evicted idle map views.");
        }
    }

    fn evict_least_recently_touched(&mut self) {
        let oldest = self
            .mounted
            .iter()
            .min_by_key(|(_, mounted)| mounted.touch_order)
            .map(|(view_id, _)| view_id.clone());
        if let Some(view_id) = oldest {
            self.mounted.remove(&view_id);
            tracing::info!(
                task = "map_view",
                view_id = %view_id,
                "Too many mounted map views, evicted the least recently used one."
            );
        }
    }
}

/// Mounted views by id. A page unmounts by removing its view. Views that the page never
/// got to unmount are evicted on a later mount, once idle or over capacity.
#[derive(Clone)]
pub struct HashMapViewsStorage {
    storage: Arc<RwLock<Views>>,
    idle_timeout: Duration,
    capacity: usize,
}

impl HashMapViewsStorage {
    pub fn new(idle_timeout: Duration, capacity: usize) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Views::default())),
            idle_timeout,
            capacity: capacity.max(1),
        }
    }

    pub async fn mount(&self, view: MapView) -> String {
        let view_id = Uuid::new_v4().to_string();
        let mut views = self.storage.write().await;
        views.evict_idle(self.idle_timeout);
        if views.mounted.len() >= self.capacity {
            views.evict_least_recently_touched();
        }
        let touch_order = views.next_touch();
        views.mounted.insert(
            view_id.clone(),
            MountedView {
                view,
                last_touched: Instant::now(),
                touch_order,
            },
        );
        view_id
    }

    pub async fn unmount(&self, view_id: &str) -> bool {
        self.storage.write().await.mounted.remove(view_id).is_some()
    }

    pub async fn is_mounted(&self, view_id: &str) -> bool {
        self.storage.read().await.mounted.contains_key(view_id)
    }

    /// Runs `f` on the view if it is still mounted. The lock is released when `f` returns.
    pub async fn update<F, R>(&self, view_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut MapView) -> R,
    {
        let mut views = self.storage.write().await;
        if !views.mounted.contains_key(view_id) {
            return None;
        }
        let touch_order = views.next_touch();
        let mounted = views.mounted.get_mut(view_id)?;
        mounted.last_touched = Instant::now();
        mounted.touch_order = touch_order;
        Some(f(&mut mounted.view))
    }

    pub async fn read<F, R>(&self, view_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&MapView) -> R,
    {
        self.storage
            .read()
            .await
            .mounted
            .get(view_id)
            .map(|mounted| f(&mounted.view))
    }

    pub async fn count(&self) -> usize {
        self.storage.read().await.mounted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::models::LatLng;
    use crate::map_view::models::Viewport;

    fn view() -> MapView {
        let viewport = Viewport {
            center: LatLng { lat: 31.1, lng: 121.5 },
            zoom: 13,
        };
        MapView::new(viewport, false)
    }

    #[tokio::test]
    async fn idle_views_are_evicted_on_the_next_mount() {
        let storage = HashMapViewsStorage::new(Duration::ZERO, 100);
        let abandoned = storage.mount(view()).await;

        let fresh = storage.mount(view()).await;

        assert!(!storage.is_mounted(&abandoned).await);
        assert!(storage.is_mounted(&fresh).await);
        assert_eq!(storage.count().await, 1);
    }

    #[tokio::test]
    async fn mounting_over_capacity_evicts_the_least_recently_used_view() {
        let storage = HashMapViewsStorage::new(Duration::from_secs(3600), 2);
        let first = storage.mount(view()).await;
        let second = storage.mount(view()).await;
        assert!(storage.update(&first, |_| ()).await.is_some());

        let third = storage.mount(view()).await;

        assert_eq!(storage.count().await, 2);
        assert!(storage.is_mounted(&first).await);
        assert!(!storage.is_mounted(&second).await);
        assert!(storage.is_mounted(&third).await);
    }

    #[tokio::test]
    async fn mounting_in_a_loop_stays_within_capacity() {
        let storage = HashMapViewsStorage::new(Duration::from_secs(3600), 3);

        for _ in 0..50 {
            storage.mount(view()).await;
        }

        assert_eq!(storage.count().await, 3);
    }
}
