mod models;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use schema::{ELECTION_VERSIONED_SCHEMAS, TABLE_NAMES};
pub use store::SqliteElectionStore;
pub use trait_def::{resolve_page, ElectionStore};

#[cfg(any(test, feature = "mock"))]
pub use trait_def::MockElectionStore;
