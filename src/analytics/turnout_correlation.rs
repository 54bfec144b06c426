use super::correlation::pearson;
use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::StateCorrelation;
use crate::election_store::SqliteElectionStore;
use rayon::prelude::*;

/// Per state, how turnout moves with the winning margin.
///
/// States are listed first, then each state's samples are fetched and
/// correlated concurrently; any failing state fails the call.
pub fn turnout_margin_correlation(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<StateCorrelation>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;

    let (predicates, states) = store.read(|conn| {
        let predicates: Vec<Predicate> = filters
            .resolve(conn, min_results)?
            .into_iter()
            .chain([
                Predicate::NotNull("r.turnout_percentage"),
                Predicate::NotNull("r.margin_percentage"),
            ])
            .collect();
        let states: Vec<(i64, String)> = SelectQuery::new("DISTINCT s.id, s.name", FACT_JOIN)
            .filters(predicates.iter().cloned())
            .order_by("s.name ASC")
            .query_map(conn, |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok((predicates, states))
    })?;

    states
        .into_par_iter()
        .map(|(state_id, state)| {
            let samples: Vec<(f64, f64)> = store.read(|conn| {
                SelectQuery::new("r.turnout_percentage, r.margin_percentage", FACT_JOIN)
                    .filters(predicates.iter().cloned())
                    .filter(Predicate::State(state_id))
                    .query_map(conn, |row| Ok((row.get(0)?, row.get(1)?)))
            })?;
            let (turnouts, margins): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();
            Ok(StateCorrelation {
                state,
                correlation: pearson(&turnouts, &margins),
                avg_turnout: mean(&turnouts),
                avg_margin: mean(&margins),
                data_points: turnouts.len() as i64,
            })
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
