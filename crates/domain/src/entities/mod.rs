//! Domain entities - Core business objects with identity

mod record;

pub use record::{RawRecord, Record, RecordInput, PLACEHOLDER_SPRITE_URL};
