use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{SelectQuery, FACT_JOIN};
use super::reports::{PartyVoteShare, StatePartyVotes, VoteShareMode, VoteShareReport};
use crate::election_store::SqliteElectionStore;

/// Votes per party.
///
/// Aggregated mode re-normalizes over exactly the filtered rows, so the
/// shares add up to 100 unless a party filter narrows the set. By-state
/// mode averages the stored per-row percentages instead.
pub fn vote_share(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
    mode: VoteShareMode,
) -> Result<VoteShareReport, AnalyticsError> {
    filters.require_year()?;
    let min_results = store.settings().valid_year_min_results;

    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        match mode {
            VoteShareMode::Aggregated => {
                let totals: Vec<(String, i64)> =
                    SelectQuery::new("p.name, COALESCE(SUM(r.votes), 0)", FACT_JOIN)
                        .filters(predicates.iter().cloned())
                        .group_by("p.name")
                        .order_by("2 DESC, p.name ASC")
                        .query_map(conn, |row| Ok((row.get(0)?, row.get(1)?)))?;

                let overall: i64 = SelectQuery::new("COALESCE(SUM(r.votes), 0)", FACT_JOIN)
                    .filters(predicates)
                    .query_one(conn, |row| row.get(0))?;
                let denominator = if overall == 0 { 1.0 } else { overall as f64 };

                Ok(VoteShareReport::Aggregated(
                    totals
                        .into_iter()
                        .map(|(party, total_votes)| PartyVoteShare {
                            party,
                            total_votes,
                            vote_share_pct: total_votes as f64 * 100.0 / denominator,
                        })
                        .collect(),
                ))
            }
            VoteShareMode::ByState => {
                let rows = SelectQuery::new(
                    "s.name, p.name, COALESCE(SUM(r.votes), 0), AVG(r.vote_share_percentage)",
                    FACT_JOIN,
                )
                .filters(predicates)
                .group_by("s.name, p.name")
                .order_by("s.name ASC, 3 DESC, p.name ASC")
                .query_map(conn, |row| {
                    Ok(StatePartyVotes {
                        state: row.get(0)?,
                        party: row.get(1)?,
                        total_votes: row.get(2)?,
                        avg_vote_share: row.get(3)?,
                    })
                })?;
                Ok(VoteShareReport::ByState(rows))
            }
        }
    })
}
