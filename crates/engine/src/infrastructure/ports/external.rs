//! External service ports.

use async_trait::async_trait;
use pokedex_domain::RawRecord;

use super::error::FetchError;

/// Source of seed records.
///
/// Implementations resolve `count` catalog entries, in catalog order, into
/// raw records. A single failed entry fails the whole call; no partial batch
/// is ever returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_records(&self, count: usize) -> Result<Vec<RawRecord>, FetchError>;
}
