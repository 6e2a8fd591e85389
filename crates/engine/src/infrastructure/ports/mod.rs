//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The remote catalog (could swap PokeAPI for a fixture file or another mirror)
//! - The clock (for testing)

mod error;
mod external;
mod testing;

pub use error::FetchError;
pub use external::CatalogPort;
pub use testing::ClockPort;

#[cfg(test)]
pub use external::MockCatalogPort;
#[cfg(test)]
pub use testing::MockClockPort;
