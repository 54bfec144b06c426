use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, FACT_JOIN};
use super::reports::EducationWinRate;
use crate::election_store::SqliteElectionStore;

pub const UNKNOWN_EDUCATION: &str = "Unknown";

/// Share of candidacies won, per declared education level.
///
/// Blank education is dropped unless the store is configured to bucket it
/// as "Unknown".
pub fn education_win_rates(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<EducationWinRate>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;
    let include_unknown = store.settings().include_unknown_education;

    let rows = store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        let query = if include_unknown {
            SelectQuery::new(
                format!(
                    "COALESCE(NULLIF(TRIM(ca.myneta_education), ''), '{}') AS education, \
                     COUNT(*), COALESCE(SUM(CASE WHEN r.position = 1 THEN 1 ELSE 0 END), 0)",
                    UNKNOWN_EDUCATION
                ),
                FACT_JOIN,
            )
            .filters(predicates)
        } else {
            SelectQuery::new(
                "TRIM(ca.myneta_education) AS education, COUNT(*), \
                 COALESCE(SUM(CASE WHEN r.position = 1 THEN 1 ELSE 0 END), 0)",
                FACT_JOIN,
            )
            .filters(predicates)
            .filter(Predicate::NotBlank("ca.myneta_education"))
        };
        query
            .group_by("education")
            .query_map(conn, |row| {
                let total_candidates: i64 = row.get(1)?;
                let winners: i64 = row.get(2)?;
                Ok(EducationWinRate {
                    education: row.get(0)?,
                    total_candidates,
                    winners,
                    win_rate: winners as f64 * 100.0 / total_candidates as f64,
                })
            })
    })?;

    let mut rows = rows;
    rows.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.total_candidates.cmp(&a.total_candidates))
            .then_with(|| a.education.cmp(&b.education))
    });
    Ok(rows)
}
