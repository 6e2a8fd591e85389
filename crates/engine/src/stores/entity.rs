//! Authoritative in-memory record store.
//!
//! Wraps the domain [`RecordCollection`] in a lock and adds catalog reloads.
//! Every mutation goes through here; views are derived by callers from
//! [`EntityStore::list`] snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pokedex_domain::{DomainError, Record, RecordCollection, RecordId, RecordInput};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{CatalogPort, ClockPort, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("A catalog reload is already in progress")]
    ReloadInProgress,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_not_found())
    }
}

/// Point-in-time summary of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub count: usize,
    pub last_reload: Option<DateTime<Utc>>,
    pub reload_in_flight: bool,
}

pub struct EntityStore {
    records: RwLock<RecordCollection>,
    last_reload: RwLock<Option<DateTime<Utc>>>,
    reloading: AtomicBool,
    catalog: Arc<dyn CatalogPort>,
    clock: Arc<dyn ClockPort>,
}

/// Clears the in-flight flag when a reload finishes, however it finishes.
struct ReloadGuard<'a>(&'a AtomicBool);

impl<'a> ReloadGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl EntityStore {
    pub fn new(catalog: Arc<dyn CatalogPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            records: RwLock::new(RecordCollection::new()),
            last_reload: RwLock::new(None),
            reloading: AtomicBool::new(false),
            catalog,
            clock,
        }
    }

    /// Replaces the whole collection with the first `count` catalog entries.
    ///
    /// On any failure the previous collection is kept. A reload requested
    /// while another is still running is rejected rather than queued.
    pub async fn reload(&self, count: usize) -> Result<usize, StoreError> {
        let Some(_guard) = ReloadGuard::acquire(&self.reloading) else {
            tracing::warn!("Reload requested while another is in flight");
            return Err(StoreError::ReloadInProgress);
        };

        let raw = match self.catalog.fetch_records(count).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, count, "Catalog reload failed, keeping current records");
                return Err(e.into());
            }
        };

        let collection = RecordCollection::from_raw(raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Catalog batch rejected during normalization");
        })?;
        let loaded = collection.len();

        *self.records.write().await = collection;
        *self.last_reload.write().await = Some(self.clock.now());

        tracing::info!(count = loaded, "Catalog reload committed");
        Ok(loaded)
    }

    /// Snapshot of every record in store order.
    pub async fn list(&self) -> Vec<Record> {
        self.records.read().await.records().to_vec()
    }

    pub async fn get_by_id(&self, id: RecordId) -> Option<Record> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn create(&self, input: &RecordInput) -> Result<Record, StoreError> {
        let record = self.records.write().await.create(input)?;
        tracing::debug!(id = %record.id(), name = record.name(), "Record created");
        Ok(record)
    }

    pub async fn update(&self, id: RecordId, input: &RecordInput) -> Result<Record, StoreError> {
        let record = self.records.write().await.update(id, input)?;
        tracing::debug!(id = %id, "Record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: RecordId) -> Result<Record, StoreError> {
        let removed = self.records.write().await.delete(id)?;
        tracing::debug!(id = %id, "Record deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn status(&self) -> StoreStatus {
        StoreStatus {
            count: self.len().await,
            last_reload: *self.last_reload.read().await,
            reload_in_flight: self.reloading.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockCatalogPort, MockClockPort};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use pokedex_domain::{RawRecord, StatKind, PLACEHOLDER_SPRITE_URL};
    use tokio::sync::Notify;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn starters() -> Vec<RawRecord> {
        vec![
            RawRecord::new(1, "Bulbasaur")
                .with_height(7)
                .with_weight(69)
                .with_types(["grass", "poison"])
                .with_sprite("https://sprites.test/1.png")
                .with_stat("hp", 45)
                .with_stat("attack", 49),
            RawRecord::new(4, "charmander")
                .with_height(6)
                .with_weight(85)
                .with_types(["fire"]),
        ]
    }

    fn catalog_returning(batch: Vec<RawRecord>) -> MockCatalogPort {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_fetch_records()
            .returning(move |_| Ok(batch.clone()));
        catalog
    }

    fn store_with(catalog: MockCatalogPort) -> EntityStore {
        EntityStore::new(Arc::new(catalog), Arc::new(FixedClock(fixed_time())))
    }

    async fn seeded_store() -> EntityStore {
        let store = store_with(catalog_returning(starters()));
        store.reload(2).await.unwrap();
        store
    }

    #[tokio::test]
    async fn reload_replaces_collection_with_normalized_batch() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_fetch_records()
            .withf(|count| *count == 100)
            .times(1)
            .returning(|_| Ok(starters()));
        let store = store_with(catalog);

        let loaded = store.reload(100).await.unwrap();

        assert_eq!(loaded, 2);
        let records = store.list().await;
        assert_eq!(records[0].name(), "bulbasaur");
        assert_eq!(records[0].stat(StatKind::Defense), 0);
        assert_eq!(records[1].sprite_url(), PLACEHOLDER_SPRITE_URL);
        assert_eq!(store.status().await.last_reload, Some(fixed_time()));
    }

    #[tokio::test]
    async fn reload_discards_local_records() {
        let store = seeded_store().await;
        store
            .create(&RecordInput::named("pika").with_types("electric"))
            .await
            .unwrap();
        assert_eq!(store.len().await, 3);

        store.reload(2).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.get_by_id(RecordId::new(5)).await.is_none());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_collection() {
        let mut catalog = MockCatalogPort::new();
        let mut calls = 0;
        catalog.expect_fetch_records().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(starters())
            } else {
                Err(FetchError::Status {
                    url: "https://pokeapi.test/pokemon/4/".into(),
                    status: 503,
                })
            }
        });
        let store = store_with(catalog);
        store.reload(2).await.unwrap();
        let before = store.list().await;

        let err = store.reload(2).await.unwrap_err();

        assert!(matches!(err, StoreError::Fetch(FetchError::Status { status: 503, .. })));
        assert_eq!(store.list().await, before);
        assert!(!store.status().await.reload_in_flight);
    }

    #[tokio::test]
    async fn reload_with_invalid_entry_commits_nothing() {
        let store = seeded_store().await;
        let before = store.list().await;

        let bad = store_with(catalog_returning(vec![
            RawRecord::new(7, "squirtle"),
            RawRecord::new(8, "   "),
        ]));
        assert!(matches!(
            bad.reload(2).await,
            Err(StoreError::Domain(DomainError::Validation(_)))
        ));
        assert!(bad.is_empty().await);
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn reload_timestamp_comes_from_clock() {
        let mut clock = MockClockPort::new();
        clock.expect_now().times(1).returning(fixed_time);
        let store = EntityStore::new(Arc::new(catalog_returning(starters())), Arc::new(clock));

        assert_eq!(store.status().await.last_reload, None);
        store.reload(2).await.unwrap();
        assert_eq!(store.status().await.last_reload, Some(fixed_time()));
    }

    struct GatedCatalog {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CatalogPort for GatedCatalog {
        async fn fetch_records(&self, _count: usize) -> Result<Vec<RawRecord>, FetchError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(starters())
        }
    }

    #[tokio::test]
    async fn overlapping_reload_is_rejected() {
        let catalog = Arc::new(GatedCatalog {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let store = Arc::new(EntityStore::new(
            catalog.clone(),
            Arc::new(FixedClock(fixed_time())),
        ));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.reload(2).await }
        });
        catalog.entered.notified().await;

        assert!(store.status().await.reload_in_flight);
        assert!(matches!(
            store.reload(2).await,
            Err(StoreError::ReloadInProgress)
        ));

        catalog.release.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), 2);
        assert!(!store.status().await.reload_in_flight);
    }

    #[tokio::test]
    async fn create_prepends_and_allocates_next_id() {
        let store = seeded_store().await;

        let pika = store
            .create(
                &RecordInput::named("Pika")
                    .with_types("electric")
                    .with_hp(35),
            )
            .await
            .unwrap();

        assert_eq!(pika.id(), RecordId::new(5));
        let ids: Vec<u32> = store.list().await.iter().map(|r| r.id().value()).collect();
        assert_eq!(ids, vec![5, 1, 4]);
    }

    #[tokio::test]
    async fn create_rejects_missing_types() {
        let store = seeded_store().await;
        let err = store.create(&RecordInput::named("typeless")).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn update_keeps_sprite_when_image_blank() {
        let store = seeded_store().await;

        let updated = store
            .update(
                RecordId::new(1),
                &RecordInput::named("Ivysaur").with_types(vec!["grass", "poison"]),
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "ivysaur");
        assert_eq!(updated.sprite_url(), "https://sprites.test/1.png");
        assert_eq!(store.list().await[0].id(), RecordId::new(1));
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let store = seeded_store().await;

        let update = store
            .update(RecordId::new(99), &RecordInput::named("x").with_types("ice"))
            .await
            .unwrap_err();
        let delete = store.delete(RecordId::new(99)).await.unwrap_err();

        assert!(update.is_not_found());
        assert!(delete.is_not_found());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let store = seeded_store().await;
        store
            .create(&RecordInput::named("pika").with_types("electric"))
            .await
            .unwrap();

        store.delete(RecordId::new(4)).await.unwrap();

        assert!(store.get_by_id(RecordId::new(4)).await.is_none());
        assert_eq!(store.len().await, 2);
    }
}
