//! Reference data for the dashboard's filter controls, and paged access to
//! individual result rows.

use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::party_category::PartyCategory;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use crate::election_store::{
    resolve_page, Constituency, District, Party, ResultRow, SqliteElectionStore, State,
};

const YEAR_JOIN: &str = "results r JOIN elections e ON e.id = r.election_id";
const CONSTITUENCY_JOIN: &str = "constituencies c JOIN states s ON s.id = c.state_id";

/// Years holding enough result rows to be analysed, oldest first.
pub fn valid_years(store: &SqliteElectionStore) -> Result<Vec<i32>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;
    store.read(|conn| {
        SelectQuery::new("DISTINCT e.year", YEAR_JOIN)
            .filter(Predicate::ValidYear { min_results })
            .order_by("e.year ASC")
            .query_map(conn, |row| row.get(0))
    })
}

pub fn states(store: &SqliteElectionStore) -> Result<Vec<State>, AnalyticsError> {
    store.read(|conn| {
        SelectQuery::new("s.id, s.name", "states s")
            .order_by("s.name ASC")
            .query_map(conn, |row| {
                Ok(State {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
    })
}

pub fn parties(
    store: &SqliteElectionStore,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<Party>, AnalyticsError> {
    let settings = store.settings();
    let page = resolve_page(
        limit,
        offset,
        settings.default_listing_limit,
        settings.max_listing_limit,
    )?;
    store.read(|conn| {
        SelectQuery::new("p.id, p.name, p.party_type_tcpd", "parties p")
            .order_by("p.name ASC")
            .limit(page.limit)
            .offset(page.offset)
            .query_map(conn, |row| {
                let party_type_tcpd: Option<String> = row.get(2)?;
                Ok(Party {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: PartyCategory::from_tcpd_type(party_type_tcpd.as_deref()),
                    party_type_tcpd,
                })
            })
    })
}

/// Distinct constituency names. Each carries the smallest id among its
/// rows, which is what the `district` filter takes.
pub fn districts(
    store: &SqliteElectionStore,
    state: Option<i64>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<District>, AnalyticsError> {
    let settings = store.settings();
    let page = resolve_page(
        limit,
        offset,
        settings.default_listing_limit,
        settings.max_listing_limit,
    )?;
    store.read(|conn| {
        SelectQuery::new(
            "MIN(c.id), c.name, GROUP_CONCAT(DISTINCT s.name), COUNT(*)",
            CONSTITUENCY_JOIN,
        )
        .filters(state.map(Predicate::State))
        .group_by("c.name")
        .order_by("c.name ASC")
        .limit(page.limit)
        .offset(page.offset)
        .query_map(conn, |row| {
            let states: Option<String> = row.get(2)?;
            Ok(District {
                id: row.get(0)?,
                name: row.get(1)?,
                states: states
                    .map(|s| s.split(',').map(str::to_string).collect())
                    .unwrap_or_default(),
                constituency_rows: row.get(3)?,
            })
        })
    })
}

/// Constituency rows, optionally narrowed to a state and/or every row of
/// a district. An unknown district id is ignored.
pub fn constituencies(
    store: &SqliteElectionStore,
    state: Option<i64>,
    district: Option<i64>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<Constituency>, AnalyticsError> {
    let settings = store.settings();
    let page = resolve_page(
        limit,
        offset,
        settings.default_listing_limit,
        settings.max_listing_limit,
    )?;
    store.read(|conn| {
        let mut query = SelectQuery::new(
            "c.id, c.state_id, s.name, c.name, c.constituency_no, c.constituency_type, \
             c.sub_region, c.assembly_no",
            CONSTITUENCY_JOIN,
        )
        .filters(state.map(Predicate::State));
        if let Some(district) = district {
            if let Some(name) = super::filters::district_name(conn, district)? {
                query = query.filter(Predicate::DistrictName(name));
            }
        }
        query
            .order_by("s.name ASC, c.name ASC, c.constituency_no ASC, c.id ASC")
            .limit(page.limit)
            .offset(page.offset)
            .query_map(conn, |row| {
                Ok(Constituency {
                    id: row.get(0)?,
                    state_id: row.get(1)?,
                    state: row.get(2)?,
                    name: row.get(3)?,
                    constituency_no: row.get(4)?,
                    constituency_type: row.get(5)?,
                    sub_region: row.get(6)?,
                    assembly_no: row.get(7)?,
                })
            })
    })
}

/// Individual result rows under the canonical filters.
pub fn results(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<ResultRow>, AnalyticsError> {
    let settings = store.settings();
    let page = resolve_page(
        limit,
        offset,
        settings.default_listing_limit,
        settings.max_listing_limit,
    )?;
    let min_results = settings.valid_year_min_results;
    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        SelectQuery::new(
            "r.id, e.year, s.name, c.id, c.name, c.constituency_no, ca.id, ca.name, ca.sex, \
             p.name, r.position, r.votes, r.turnout_percentage, r.vote_share_percentage, \
             r.margin_percentage, r.valid_votes, r.electors, r.deposit_lost",
            FACT_JOIN,
        )
        .filters(predicates)
        .order_by("e.year ASC, s.name ASC, c.name ASC, c.constituency_no ASC, r.position ASC, r.id ASC")
        .limit(page.limit)
        .offset(page.offset)
        .query_map(conn, |row| {
            let deposit_lost: Option<i64> = row.get(17)?;
            Ok(ResultRow {
                id: row.get(0)?,
                year: row.get(1)?,
                state: row.get(2)?,
                constituency_id: row.get(3)?,
                constituency: row.get(4)?,
                constituency_no: row.get(5)?,
                candidate_id: row.get(6)?,
                candidate: row.get(7)?,
                sex: row.get(8)?,
                party: row.get(9)?,
                position: row.get(10)?,
                votes: row.get(11)?,
                turnout_percentage: row.get(12)?,
                vote_share_percentage: row.get(13)?,
                margin_percentage: row.get(14)?,
                valid_votes: row.get(15)?,
                electors: row.get(16)?,
                deposit_lost: deposit_lost.map(|v| v != 0),
            })
        })
    })
}
