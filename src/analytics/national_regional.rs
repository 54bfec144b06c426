use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::party_category::PartyCategory;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::CategoryVoteShare;
use crate::election_store::SqliteElectionStore;
use std::collections::BTreeMap;

/// Yearly vote split between national, regional and other parties.
///
/// Each bucket is divided by the year's total over all parties. Every year
/// with votes lists all three buckets, empty ones at zero.
pub fn national_vs_regional(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<CategoryVoteShare>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;

    let rows: Vec<(i32, Option<String>, i64)> = store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new("e.year, p.party_type_tcpd, SUM(r.votes)", FACT_JOIN)
            .filters(predicates)
            .filter(Predicate::PositiveVotes)
            .group_by("e.year, p.party_type_tcpd")
            .query_map(conn, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
    })?;

    let mut by_year: BTreeMap<i32, BTreeMap<PartyCategory, i64>> = BTreeMap::new();
    for (year, party_type, votes) in rows {
        let category = PartyCategory::from_tcpd_type(party_type.as_deref());
        *by_year
            .entry(year)
            .or_default()
            .entry(category)
            .or_default() += votes;
    }

    let mut shares = Vec::with_capacity(by_year.len() * PartyCategory::ALL.len());
    for (year, buckets) in by_year {
        let year_total: i64 = buckets.values().sum();
        for category in PartyCategory::ALL {
            let total_votes = buckets.get(&category).copied().unwrap_or(0);
            let percentage = if year_total == 0 {
                0.0
            } else {
                total_votes as f64 * 100.0 / year_total as f64
            };
            shares.push(CategoryVoteShare {
                year,
                category,
                total_votes,
                percentage,
            });
        }
    }
    Ok(shares)
}
