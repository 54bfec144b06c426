//! Seats per party with the winners behind each count.

use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{query_map_sql, Predicate, SelectQuery, FACT_JOIN};
use super::reports::{DistrictWinners, PartySeats};
use crate::election_store::SqliteElectionStore;
use rayon::prelude::*;
use rusqlite::Connection;
use tracing::debug;

/// Distinct winning (party, constituency, candidate) triples. Seat counts
/// and winner lists are both derived from this set.
fn winning_pairs(predicates: &[Predicate]) -> SelectQuery {
    SelectQuery::new(
        "DISTINCT p.name AS party, r.constituency_id, r.candidate_id",
        FACT_JOIN,
    )
    .filters(predicates.iter().cloned())
    .filter(Predicate::Position(1))
}

/// Seat count per party name, most seats first.
pub(crate) fn seats_per_party(
    conn: &Connection,
    predicates: &[Predicate],
) -> Result<Vec<(String, i64)>, AnalyticsError> {
    let (inner, params) = winning_pairs(predicates).build();
    let sql = format!(
        "SELECT party, COUNT(*) AS seats FROM ({}) GROUP BY party ORDER BY seats DESC, party ASC",
        inner
    );
    query_map_sql(conn, &sql, &params, |row| Ok((row.get(0)?, row.get(1)?)))
}

fn winners_for_party(
    conn: &Connection,
    predicates: &[Predicate],
    party: &str,
) -> Result<Vec<DistrictWinners>, AnalyticsError> {
    let rows = SelectQuery::new(
        "DISTINCT r.constituency_id, r.candidate_id, ca.name, c.name, c.constituency_no",
        FACT_JOIN,
    )
    .filters(predicates.iter().cloned())
    .filter(Predicate::Position(1))
    .filter(Predicate::PartyName(party.to_string()))
    .order_by("c.name ASC, c.constituency_no ASC, ca.name ASC")
    .query_map(conn, |row| {
        Ok((row.get::<_, String>(2)?, row.get::<_, String>(3)?))
    })?;

    let mut districts: Vec<DistrictWinners> = Vec::new();
    for (winner, district) in rows {
        match districts.last_mut() {
            Some(last) if last.district == district => last.winners.push(winner),
            _ => districts.push(DistrictWinners {
                district,
                winners: vec![winner],
            }),
        }
    }
    Ok(districts)
}

/// Seats won per party in the requested year, each with its winners
/// grouped by district.
///
/// The winner lists are fetched concurrently, one query per party; the
/// first failure fails the whole call.
pub fn seat_share(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<PartySeats>, AnalyticsError> {
    filters.require_year()?;
    let min_results = store.settings().valid_year_min_results;

    let (predicates, seats) = store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        let seats = seats_per_party(conn, &predicates)?;
        Ok((predicates, seats))
    })?;
    debug!("Seat share: {} parties won seats", seats.len());

    seats
        .into_par_iter()
        .map(|(party, seats)| {
            let winners = store.read(|conn| winners_for_party(conn, &predicates, &party))?;
            Ok(PartySeats {
                party,
                seats,
                winners,
            })
        })
        .collect()
}
