use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::GenderTrendRow;
use crate::election_store::SqliteElectionStore;
use std::collections::HashMap;

/// Candidacies per (year, sex), with each row's share of its own year.
///
/// Rows without a recorded sex are left out of both the counts and the
/// yearly totals. Codes other than M/F are returned as stored.
pub fn gender_trend(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<GenderTrendRow>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;

    let counts: Vec<(i32, String, i64)> = store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new("e.year, ca.sex, COUNT(*)", FACT_JOIN)
            .filters(predicates)
            .filter(Predicate::NotNull("ca.sex"))
            .group_by("e.year, ca.sex")
            .order_by("e.year ASC, ca.sex ASC")
            .query_map(conn, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
    })?;

    let mut year_totals: HashMap<i32, i64> = HashMap::new();
    for (year, _, count) in &counts {
        *year_totals.entry(*year).or_default() += count;
    }

    Ok(counts
        .into_iter()
        .map(|(year, sex, count)| {
            let total = year_totals.get(&year).copied().unwrap_or(0);
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            GenderTrendRow {
                year,
                sex,
                count,
                percentage,
            }
        })
        .collect())
}
