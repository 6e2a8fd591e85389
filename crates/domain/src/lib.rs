//! Creature records and everything that can be derived from them without I/O:
//! normalization, identity allocation, filtering, sorting and paging.

pub mod browse;
pub mod collection;
pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod pager;
pub mod query;
pub mod value_objects;

pub use browse::{BrowseState, BrowseView, DEFAULT_MAX_VISIBLE_PAGES};
pub use collection::RecordCollection;
pub use entities::{RawRecord, Record, RecordInput, PLACEHOLDER_SPRITE_URL};
pub use error::DomainError;
pub use ids::RecordId;
pub use pager::{page, page_count, DEFAULT_PAGE_SIZE};
pub use query::{filter_and_sort, QuerySpec, SortDirection, SortField, SortKey, ValueRange};
pub use value_objects::{
    tracked_stats, with_tracked_defaults, ElementType, ListField, NumericField, StatEntry,
    StatKind,
};
