use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::Kpis;
use crate::election_store::SqliteElectionStore;

/// Headline numbers for one year.
///
/// The three values share the filter set but not their row sets: turnout
/// skips rows without turnout and the women share skips rows without sex.
pub fn kpis(store: &SqliteElectionStore, filters: &MetricFilters) -> Result<Kpis, AnalyticsError> {
    filters.require_year()?;
    let min_results = store.settings().valid_year_min_results;

    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;

        let total_seats: i64 = SelectQuery::new("COUNT(DISTINCT r.constituency_id)", FACT_JOIN)
            .filters(predicates.iter().cloned())
            .filter(Predicate::Position(1))
            .query_one(conn, |row| row.get(0))?;

        let overall_turnout: Option<f64> =
            SelectQuery::new("AVG(r.turnout_percentage)", FACT_JOIN)
                .filters(predicates.iter().cloned())
                .query_one(conn, |row| row.get(0))?;

        let (women, with_sex): (i64, i64) = SelectQuery::new(
            "COALESCE(SUM(CASE WHEN ca.sex = 'F' THEN 1 ELSE 0 END), 0), COUNT(*)",
            FACT_JOIN,
        )
        .filters(predicates)
        .filter(Predicate::NotNull("ca.sex"))
        .query_one(conn, |row| Ok((row.get(0)?, row.get(1)?)))?;

        let women_candidates_pct = if with_sex == 0 {
            None
        } else {
            Some(women as f64 * 100.0 / with_sex as f64)
        };

        Ok(Kpis {
            total_seats,
            overall_turnout,
            women_candidates_pct,
        })
    })
}
