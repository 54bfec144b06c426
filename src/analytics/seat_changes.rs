use super::error::AnalyticsError;
use super::filters::{validate_year, MetricFilters};
use super::reports::SeatChange;
use super::seat_share::seats_per_party;
use crate::election_store::SqliteElectionStore;
use std::collections::{BTreeMap, BTreeSet};

/// Seat delta per party between two years.
///
/// Each year is counted on its own and the two party maps are merged, so a
/// party present in only one year still shows up with zero on the other
/// side. Biggest gain first, ties by party name.
pub fn seat_changes(
    store: &SqliteElectionStore,
    year1: Option<i32>,
    year2: Option<i32>,
    filters: &MetricFilters,
) -> Result<Vec<SeatChange>, AnalyticsError> {
    let year1 = validate_year(
        "year1",
        year1.ok_or_else(|| AnalyticsError::validation("year1 is required"))?,
    )?;
    let year2 = validate_year(
        "year2",
        year2.ok_or_else(|| AnalyticsError::validation("year2 is required"))?,
    )?;
    let min_results = store.settings().valid_year_min_results;
    let base = filters.without_year();

    let (first, second) = store.read(|conn| {
        let count = |year: i32| -> Result<BTreeMap<String, i64>, AnalyticsError> {
            let filters = MetricFilters {
                year: Some(year),
                ..base.clone()
            };
            let predicates = filters.resolve(conn, min_results)?;
            Ok(seats_per_party(conn, &predicates)?.into_iter().collect())
        };
        Ok((count(year1)?, count(year2)?))
    })?;

    let parties: BTreeSet<&String> = first.keys().chain(second.keys()).collect();
    let mut changes: Vec<SeatChange> = parties
        .into_iter()
        .map(|party| {
            let year1_seats = first.get(party).copied().unwrap_or(0);
            let year2_seats = second.get(party).copied().unwrap_or(0);
            SeatChange {
                party: party.clone(),
                year1_seats,
                year2_seats,
                change: year2_seats - year1_seats,
            }
        })
        .collect();
    changes.sort_by(|a, b| b.change.cmp(&a.change).then_with(|| a.party.cmp(&b.party)));
    Ok(changes)
}
