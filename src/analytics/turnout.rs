//! Turnout and participation views: per-state turnout, the highest turnout
//! seats, and women's candidacies over time.

use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::{ConstituencyTurnout, StateTurnout, WomenCandidatesRow};
use crate::election_store::SqliteElectionStore;

pub const DEFAULT_HIGHEST_TURNOUT_LIMIT: usize = 10;

/// Average turnout per state in one year, highest first.
///
/// Turnout is a property of the contest, so only winner rows are sampled:
/// one per contest.
pub fn turnout_by_state(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<StateTurnout>, AnalyticsError> {
    filters.require_year()?;
    let min_results = store.settings().valid_year_min_results;

    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new(
            "s.name, AVG(r.turnout_percentage), COUNT(DISTINCT r.constituency_id)",
            FACT_JOIN,
        )
        .filters(predicates)
        .filter(Predicate::Position(1))
        .filter(Predicate::NotNull("r.turnout_percentage"))
        .group_by("s.name")
        .order_by("2 DESC, s.name ASC")
        .query_map(conn, |row| {
            Ok(StateTurnout {
                state: row.get(0)?,
                avg_turnout: row.get(1)?,
                constituencies: row.get(2)?,
            })
        })
    })
}

/// Contests of one year with the highest turnout.
pub fn highest_turnout(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
    limit: Option<usize>,
) -> Result<Vec<ConstituencyTurnout>, AnalyticsError> {
    filters.require_year()?;
    let limit = limit.unwrap_or(DEFAULT_HIGHEST_TURNOUT_LIMIT);
    if limit == 0 {
        return Err(AnalyticsError::validation("limit must be at least 1"));
    }
    let limit = limit.min(store.settings().max_listing_limit);
    let min_results = store.settings().valid_year_min_results;

    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new(
            "e.year, s.name, c.id, c.name, ca.name, p.name, r.turnout_percentage",
            FACT_JOIN,
        )
        .filters(predicates)
        .filter(Predicate::Position(1))
        .filter(Predicate::NotNull("r.turnout_percentage"))
        .order_by("r.turnout_percentage DESC, c.name ASC")
        .limit(limit)
        .query_map(conn, |row| {
            Ok(ConstituencyTurnout {
                year: row.get(0)?,
                state: row.get(1)?,
                constituency_id: row.get(2)?,
                constituency: row.get(3)?,
                winner: row.get(4)?,
                party: row.get(5)?,
                turnout_percentage: row.get(6)?,
            })
        })
    })
}

/// Women's candidacies and wins per year.
pub fn women_candidates(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<WomenCandidatesRow>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;

    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new(
            "e.year, \
             COALESCE(SUM(CASE WHEN ca.sex = 'F' THEN 1 ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN ca.sex = 'F' AND r.position = 1 THEN 1 ELSE 0 END), 0), \
             COUNT(*)",
            FACT_JOIN,
        )
        .filters(predicates)
        .group_by("e.year")
        .order_by("e.year ASC")
        .query_map(conn, |row| {
            let women_candidates: i64 = row.get(1)?;
            let total_candidates: i64 = row.get(3)?;
            Ok(WomenCandidatesRow {
                year: row.get(0)?,
                women_candidates,
                women_winners: row.get(2)?,
                total_candidates,
                women_pct: women_candidates as f64 * 100.0 / total_candidates as f64,
            })
        })
    })
}
