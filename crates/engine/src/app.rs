//! Application state and composition.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::infrastructure::ports::{CatalogPort, ClockPort};
use crate::stores::EntityStore;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub store: Arc<EntityStore>,
    pub config: EngineConfig,
}

impl App {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        clock: Arc<dyn ClockPort>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store: Arc::new(EntityStore::new(catalog, clock)),
            config,
        }
    }

    /// Initial catalog load. Failure leaves the store empty and is only logged.
    pub async fn seed(&self) {
        let count = self.config.catalog_seed_count;
        match self.store.reload(count).await {
            Ok(loaded) => tracing::info!(loaded, "Seeded record store from catalog"),
            Err(e) => tracing::warn!(
                error = %e,
                "Initial catalog load failed; starting with an empty store"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{FetchError, MockCatalogPort};
    use pokedex_domain::RawRecord;

    #[tokio::test]
    async fn seed_loads_configured_count() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_fetch_records()
            .withf(|count| *count == 3)
            .returning(|count| {
                Ok((1..=count as u32)
                    .map(|id| RawRecord::new(id, format!("mon{id}")))
                    .collect())
            });
        let config = EngineConfig {
            catalog_seed_count: 3,
            ..EngineConfig::default()
        };
        let app = App::new(Arc::new(catalog), Arc::new(SystemClock::new()), config);

        app.seed().await;

        assert_eq!(app.store.len().await, 3);
    }

    #[tokio::test]
    async fn seed_failure_leaves_store_empty() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_fetch_records()
            .returning(|_| Err(FetchError::request_failed("connection refused")));
        let app = App::new(
            Arc::new(catalog),
            Arc::new(SystemClock::new()),
            EngineConfig::default(),
        );

        app.seed().await;

        assert!(app.store.is_empty().await);
    }
}
