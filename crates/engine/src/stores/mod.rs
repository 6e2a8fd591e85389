//! In-memory state storage modules.
//!
//! - `EntityStore` - the authoritative record collection plus catalog reloads

pub mod entity;

pub use entity::{EntityStore, StoreError, StoreStatus};
