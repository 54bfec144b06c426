//! Analytics API routes
//!
//! Every route takes the same query string; each handler picks the
//! parameters its metric understands and ignores the rest.

use crate::analytics::{AnalyticsError, Gender, MetricFilters, VoteShareMode};
use crate::election_store::{ElectionStore, SearchScope};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::errors::from_query_rejection;
use super::metrics::{record_error, record_metric_query};
use super::state::{GuardedElectionStore, ServerState};

pub(super) type QueryParams = Result<Query<AnalyticsQuery>, QueryRejection>;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AnalyticsQuery {
    pub year: Option<i32>,
    pub year1: Option<i32>,
    pub year2: Option<i32>,
    pub state: Option<i64>,
    pub party: Option<i64>,
    pub gender: Option<String>,
    pub district: Option<i64>,
    pub constituency: Option<i64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Vote share only; defaults to true.
    pub aggregate: Option<bool>,
    /// Search only.
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl AnalyticsQuery {
    pub fn to_filters(&self) -> Result<MetricFilters, AnalyticsError> {
        let gender = match self.gender.as_deref() {
            None => None,
            Some(g) if g.trim().is_empty() => None,
            Some(g) => Some(Gender::parse(g)?),
        };
        let filters = MetricFilters {
            year: self.year,
            state: self.state,
            party: self.party,
            gender,
            district: self.district,
            constituency: self.constituency,
        };
        filters.validate()?;
        Ok(filters)
    }

    pub fn vote_share_mode(&self) -> VoteShareMode {
        if self.aggregate.unwrap_or(true) {
            VoteShareMode::Aggregated
        } else {
            VoteShareMode::ByState
        }
    }

    pub fn search_scope(&self) -> Result<SearchScope, AnalyticsError> {
        SearchScope::parse(self.kind.as_deref())
    }
}

/// Runs one store call on the blocking pool and renders its outcome.
///
/// `metric` labels both the duration histogram and the error counter.
pub(super) async fn run_query<T, F>(
    store: GuardedElectionStore,
    metric: &'static str,
    params: QueryParams,
    call: F,
) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&dyn ElectionStore, AnalyticsQuery) -> Result<T, AnalyticsError> + Send + 'static,
{
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let err = from_query_rejection(rejection);
            record_error(err.kind(), metric);
            return err.into_response();
        }
    };

    let start = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || call(store.as_ref(), params)).await;
    record_metric_query(metric, start.elapsed());

    let result = match outcome {
        Ok(result) => result,
        Err(join_err) => Err(AnalyticsError::Query(format!(
            "{} task failed: {}",
            metric, join_err
        ))),
    };
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => {
            record_error(err.kind(), metric);
            err.into_response()
        }
    }
}

async fn seat_share(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "seat_share", params, |store, q| {
        store.seat_share(&q.to_filters()?)
    })
    .await
}

async fn vote_share(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "vote_share", params, |store, q| {
        store.vote_share(&q.to_filters()?, q.vote_share_mode())
    })
    .await
}

async fn gender_trend(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "gender_trend", params, |store, q| {
        store.gender_trend(&q.to_filters()?)
    })
    .await
}

async fn margins(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "margins", params, |store, q| {
        store.margins(&q.to_filters()?, q.limit)
    })
    .await
}

async fn closest_contests(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "closest_contests", params, |store, q| {
        store.closest_contests(&q.to_filters()?)
    })
    .await
}

async fn kpis(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "kpis", params, |store, q| store.kpis(&q.to_filters()?)).await
}

async fn seat_changes(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "seat_changes", params, |store, q| {
        store.seat_changes(q.year1, q.year2, &q.to_filters()?.without_year())
    })
    .await
}

async fn turnout_margin_correlation(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "turnout_margin_correlation", params, |store, q| {
        store.turnout_margin_correlation(&q.to_filters()?)
    })
    .await
}

async fn national_vs_regional(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "national_vs_regional", params, |store, q| {
        store.national_vs_regional(&q.to_filters()?)
    })
    .await
}

async fn education_correlation(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "education_correlation", params, |store, q| {
        store.education_win_rates(&q.to_filters()?)
    })
    .await
}

async fn turnout(State(store): State<GuardedElectionStore>, params: QueryParams) -> Response {
    run_query(store, "turnout", params, |store, q| {
        store.turnout_by_state(&q.to_filters()?)
    })
    .await
}

async fn highest_turnout(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "highest_turnout", params, |store, q| {
        store.highest_turnout(&q.to_filters()?, q.limit)
    })
    .await
}

async fn women_candidates(
    State(store): State<GuardedElectionStore>,
    params: QueryParams,
) -> Response {
    run_query(store, "women_candidates", params, |store, q| {
        store.women_candidates(&q.to_filters()?)
    })
    .await
}

pub fn make_analytics_routes(state: ServerState) -> Router {
    Router::new()
        .route("/seat-share", get(seat_share))
        .route("/vote-share", get(vote_share))
        .route("/gender-trend", get(gender_trend))
        .route("/margins", get(margins))
        .route("/closest-contests", get(closest_contests))
        .route("/kpis", get(kpis))
        .route("/seat-changes", get(seat_changes))
        .route(
            "/turnout-margin-correlation",
            get(turnout_margin_correlation),
        )
        .route("/national-vs-regional", get(national_vs_regional))
        .route("/education-correlation", get(education_correlation))
        .route("/turnout", get(turnout))
        .route("/highest-turnout", get(highest_turnout))
        .route("/women-candidates", get(women_candidates))
        .with_state(state)
}
