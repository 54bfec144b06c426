//! Row-level entities exposed through the reference listings.

use crate::analytics::PartyCategory;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    pub name: String,
    pub party_type_tcpd: Option<String>,
    pub category: PartyCategory,
}

/// All constituency rows sharing a name. `id` is the smallest of their ids
/// and is what the `district` filter expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub states: Vec<String>,
    pub constituency_rows: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constituency {
    pub id: i64,
    pub state_id: i64,
    pub state: String,
    pub name: String,
    pub constituency_no: Option<i64>,
    pub constituency_type: Option<String>,
    pub sub_region: Option<String>,
    pub assembly_no: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: i64,
    pub year: i32,
    pub state: String,
    pub constituency_id: i64,
    pub constituency: String,
    pub constituency_no: Option<i64>,
    pub candidate_id: i64,
    pub candidate: String,
    pub sex: Option<String>,
    pub party: String,
    pub position: Option<i64>,
    pub votes: Option<i64>,
    pub turnout_percentage: Option<f64>,
    pub vote_share_percentage: Option<f64>,
    pub margin_percentage: Option<f64>,
    pub valid_votes: Option<i64>,
    pub electors: Option<i64>,
    pub deposit_lost: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Candidate,
    Constituency,
    Party,
}

/// Which entity kinds a search covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    Candidate,
    Constituency,
    Party,
    #[default]
    All,
}

impl SearchScope {
    pub fn includes(&self, kind: SearchKind) -> bool {
        matches!(
            (self, kind),
            (SearchScope::All, _)
                | (SearchScope::Candidate, SearchKind::Candidate)
                | (SearchScope::Constituency, SearchKind::Constituency)
                | (SearchScope::Party, SearchKind::Party)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    pub id: i64,
    pub name: String,
    /// State for constituencies, TCPD type for parties, sex for candidates.
    pub detail: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

/// Number of rows per table, logged at startup and exported as a gauge.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DatasetCounts {
    pub counts: Vec<(String, i64)>,
}

impl DatasetCounts {
    pub fn get(&self, table: &str) -> Option<i64> {
        self.counts
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, count)| *count)
    }
}
