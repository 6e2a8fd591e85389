//! Value objects - Immutable objects defined by their attributes

mod element_type;
mod form_field;
mod stat;

pub use element_type::ElementType;
pub use form_field::{ListField, NumericField};
pub use stat::{tracked_stats, with_tracked_defaults, StatEntry, StatKind};
