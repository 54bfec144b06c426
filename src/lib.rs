//! Lok Sabha Election Analytics Server Library
//!
//! Read-only analytics over Indian general election results, served as a
//! JSON API. Exposes the internal modules for testing and reuse.

pub mod analytics;
pub mod config;
pub mod election_store;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use analytics::{AnalyticsError, MetricFilters};
pub use election_store::{ElectionStore, SqliteElectionStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
