use axum::extract::FromRef;

use crate::election_store::ElectionStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedElectionStore = Arc<dyn ElectionStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub election_store: GuardedElectionStore,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, election_store: GuardedElectionStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            election_store,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedElectionStore {
    fn from_ref(input: &ServerState) -> Self {
        input.election_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
