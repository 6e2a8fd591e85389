//! Pokedex engine library.
//!
//! Owns the authoritative record store and serves it over HTTP.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `stores/` - In-memory record store
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod stores;

pub use app::App;
pub use config::EngineConfig;
