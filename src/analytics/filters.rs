//! Canonical filter set shared by every metric, and its resolution into
//! SQL predicates.

use super::error::AnalyticsError;
use super::query::Predicate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_YEAR: i32 = 1950;
pub const MAX_YEAR: i32 = 2100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AnalyticsError> {
        match value.trim() {
            "M" | "m" => Ok(Gender::Male),
            "F" | "f" => Ok(Gender::Female),
            other => Err(AnalyticsError::validation(format!(
                "gender must be M or F, got '{}'",
                other
            ))),
        }
    }
}

pub fn validate_year(name: &str, year: i32) -> Result<i32, AnalyticsError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(AnalyticsError::validation(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_YEAR, MAX_YEAR, year
        )))
    }
}

/// Optional conjunctive filters accepted by the metrics.
///
/// `district` is the id of any constituency row; it widens to every
/// constituency sharing that row's name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricFilters {
    pub year: Option<i32>,
    pub state: Option<i64>,
    pub party: Option<i64>,
    pub gender: Option<Gender>,
    pub district: Option<i64>,
    pub constituency: Option<i64>,
}

impl MetricFilters {
    pub fn for_year(year: i32) -> Self {
        MetricFilters {
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if let Some(year) = self.year {
            validate_year("year", year)?;
        }
        Ok(())
    }

    /// Fails before touching the store when a year-scoped metric is asked
    /// for without a year.
    pub fn require_year(&self) -> Result<i32, AnalyticsError> {
        match self.year {
            Some(year) => validate_year("year", year),
            None => Err(AnalyticsError::validation("year is required")),
        }
    }

    /// Same filters with the year dimension removed.
    pub fn without_year(&self) -> Self {
        MetricFilters {
            year: None,
            ..self.clone()
        }
    }

    /// Turns the filter set into predicates over the fact join.
    ///
    /// The valid-year predicate is always first. An unknown district id
    /// contributes nothing.
    pub fn resolve(
        &self,
        conn: &Connection,
        valid_year_min_results: i64,
    ) -> Result<Vec<Predicate>, AnalyticsError> {
        self.validate()?;

        let mut predicates = vec![Predicate::ValidYear {
            min_results: valid_year_min_results,
        }];
        if let Some(year) = self.year {
            predicates.push(Predicate::Year(year));
        }
        if let Some(state) = self.state {
            predicates.push(Predicate::State(state));
        }
        if let Some(party) = self.party {
            predicates.push(Predicate::Party(party));
        }
        if let Some(gender) = self.gender {
            predicates.push(Predicate::Sex(gender.code().to_string()));
        }
        if let Some(district) = self.district {
            match district_name(conn, district)? {
                Some(name) => predicates.push(Predicate::DistrictName(name)),
                None => debug!("Ignoring unknown district id {}", district),
            }
        }
        if let Some(constituency) = self.constituency {
            predicates.push(Predicate::Constituency(constituency));
        }
        Ok(predicates)
    }
}

/// Name of the constituency row `district_id`, if it exists.
pub fn district_name(conn: &Connection, district_id: i64) -> Result<Option<String>, AnalyticsError> {
    match conn.query_row(
        "SELECT name FROM constituencies WHERE id = ?1",
        params![district_id],
        |r| r.get(0),
    ) {
        Ok(name) => Ok(Some(name)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
