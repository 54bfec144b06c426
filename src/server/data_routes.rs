//! Reference data, row-level results and search routes

use axum::{extract::State, response::Response, routing::get, Router};

use super::analytics_routes::{run_query, QueryParams};
use super::state::{GuardedElectionStore, ServerState};

async fn years(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "years", params, |store, _| store.valid_years()).await
}

async fn states(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "states", params, |store, _| store.states()).await
}

async fn parties(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "parties", params, |store, q| {
        store.parties(q.limit, q.offset)
    })
    .await
}

async fn districts(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "districts", params, |store, q| {
        store.districts(q.state, q.limit, q.offset)
    })
    .await
}

async fn constituencies(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "constituencies", params, |store, q| {
        store.constituencies(q.state, q.district, q.limit, q.offset)
    })
    .await
}

async fn results(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "results", params, |store, q| {
        store.results(&q.to_filters()?, q.limit, q.offset)
    })
    .await
}

async fn search(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "search", params, |store, q| {
        let scope = q.search_scope()?;
        store.search(q.q.as_deref().unwrap_or(""), scope, q.limit, q.offset)
    })
    .await
}

pub fn make_data_routes(state: ServerState) -> Router {
    Router::new()
        .route("/years", get(years))
        .route("/states", get(states))
        .route("/parties", get(parties))
        .route("/districts", get(districts))
        .route("/constituencies", get(constituencies))
        .route("/results", get(results))
        .with_state(state)
}

pub fn make_search_routes(state: ServerState) -> Router {
    Router::new().route("/search", get(search)).with_state(state)
}
