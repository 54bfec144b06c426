//! Metric engine: every aggregation the API exposes, each a function of a
//! store handle and a filter set.

mod correlation;
mod education;
mod error;
mod filters;
mod gender_trend;
mod kpis;
mod listings;
mod margins;
mod national_regional;
mod party_category;
mod query;
mod reports;
mod search;
mod seat_changes;
mod seat_share;
mod turnout;
mod turnout_correlation;
mod vote_share;

#[cfg(test)]
pub(crate) mod test_support;

pub use correlation::pearson;
pub use education::{education_win_rates, UNKNOWN_EDUCATION};
pub use error::AnalyticsError;
pub use filters::{validate_year, Gender, MetricFilters, MAX_YEAR, MIN_YEAR};
pub use gender_trend::gender_trend;
pub use kpis::kpis;
pub use listings::{constituencies, districts, parties, results, states, valid_years};
pub use margins::{closest_contests, margins, CLOSEST_CONTESTS_LIMIT, DEFAULT_MARGINS_LIMIT};
pub use national_regional::national_vs_regional;
pub use party_category::PartyCategory;
pub use query::{Predicate, SelectQuery};
pub use reports::*;
pub use search::search;
pub use seat_changes::seat_changes;
pub use seat_share::seat_share;
pub use turnout::{highest_turnout, turnout_by_state, women_candidates};
pub use turnout_correlation::turnout_margin_correlation;
pub use vote_share::vote_share;
