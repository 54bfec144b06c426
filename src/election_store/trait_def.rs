//! ElectionStore trait definition.
//!
//! The HTTP layer only sees this trait, so route tests can run against a
//! mock instead of a seeded database.

use super::models::{
    Constituency, DatasetCounts, District, Page, Party, ResultRow, SearchHit, SearchScope, State,
};
use crate::analytics::{
    AnalyticsError, CategoryVoteShare, ConstituencyTurnout, ContestMargin, EducationWinRate,
    GenderTrendRow, Kpis, MetricFilters, PartySeats, SeatChange, StateCorrelation, StateTurnout,
    VoteShareMode, VoteShareReport, WomenCandidatesRow,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ElectionStore: Send + Sync {
    // =========================================================================
    // Metrics
    // =========================================================================

    /// Seats won per party in one year, with the winners of each district.
    fn seat_share(&self, filters: &MetricFilters) -> Result<Vec<PartySeats>, AnalyticsError>;

    fn vote_share(
        &self,
        filters: &MetricFilters,
        mode: VoteShareMode,
    ) -> Result<VoteShareReport, AnalyticsError>;

    /// Candidacies per (year, sex) with each year's split in percent.
    fn gender_trend(&self, filters: &MetricFilters) -> Result<Vec<GenderTrendRow>, AnalyticsError>;

    /// Narrowest wins first. `limit` defaults to 10.
    fn margins(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
    ) -> Result<Vec<ContestMargin>, AnalyticsError>;

    fn closest_contests(&self, filters: &MetricFilters)
        -> Result<Vec<ContestMargin>, AnalyticsError>;

    fn kpis(&self, filters: &MetricFilters) -> Result<Kpis, AnalyticsError>;

    /// Per-party seat delta from `year1` to `year2`. Any year in `filters`
    /// is ignored.
    fn seat_changes(
        &self,
        year1: Option<i32>,
        year2: Option<i32>,
        filters: &MetricFilters,
    ) -> Result<Vec<SeatChange>, AnalyticsError>;

    fn turnout_margin_correlation(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<StateCorrelation>, AnalyticsError>;

    fn national_vs_regional(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<CategoryVoteShare>, AnalyticsError>;

    fn education_win_rates(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<EducationWinRate>, AnalyticsError>;

    fn turnout_by_state(&self, filters: &MetricFilters)
        -> Result<Vec<StateTurnout>, AnalyticsError>;

    fn highest_turnout(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
    ) -> Result<Vec<ConstituencyTurnout>, AnalyticsError>;

    fn women_candidates(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<WomenCandidatesRow>, AnalyticsError>;

    // =========================================================================
    // Reference data
    // =========================================================================

    fn valid_years(&self) -> Result<Vec<i32>, AnalyticsError>;

    fn states(&self) -> Result<Vec<State>, AnalyticsError>;

    fn parties(&self, limit: Option<usize>, offset: Option<usize>)
        -> Result<Vec<Party>, AnalyticsError>;

    fn districts(
        &self,
        state: Option<i64>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<District>, AnalyticsError>;

    fn constituencies(
        &self,
        state: Option<i64>,
        district: Option<i64>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Constituency>, AnalyticsError>;

    fn results(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ResultRow>, AnalyticsError>;

    fn search(
        &self,
        query: &str,
        scope: SearchScope,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<SearchHit>, AnalyticsError>;

    // =========================================================================
    // Counts (for metrics)
    // =========================================================================

    fn dataset_counts(&self) -> Result<DatasetCounts, AnalyticsError>;
}

/// Resolves optional paging arguments against the configured bounds.
///
/// A zero limit is rejected; anything above `max` is clamped.
pub fn resolve_page(
    limit: Option<usize>,
    offset: Option<usize>,
    default_limit: usize,
    max_limit: usize,
) -> Result<Page, AnalyticsError> {
    let limit = limit.unwrap_or(default_limit);
    if limit == 0 {
        return Err(AnalyticsError::validation("limit must be at least 1"));
    }
    Ok(Page {
        limit: limit.min(max_limit),
        offset: offset.unwrap_or(0),
    })
}
