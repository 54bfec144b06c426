//! Serializable shapes returned by the metrics. Field names are the JSON
//! keys the dashboard reads.

use super::party_category::PartyCategory;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictWinners {
    pub district: String,
    pub winners: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartySeats {
    pub party: String,
    pub seats: i64,
    pub winners: Vec<DistrictWinners>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyVoteShare {
    pub party: String,
    pub total_votes: i64,
    pub vote_share_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatePartyVotes {
    pub state: String,
    pub party: String,
    pub total_votes: i64,
    pub avg_vote_share: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteShareMode {
    Aggregated,
    ByState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoteShareReport {
    Aggregated(Vec<PartyVoteShare>),
    ByState(Vec<StatePartyVotes>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenderTrendRow {
    pub year: i32,
    pub sex: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContestMargin {
    pub year: i32,
    pub state: String,
    pub constituency_id: i64,
    pub constituency: String,
    pub winner: String,
    pub winner_party: String,
    pub winner_votes: i64,
    pub runner_up: String,
    pub runner_up_party: String,
    pub runner_up_votes: i64,
    pub margin: i64,
    pub margin_percentage: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_seats: i64,
    pub overall_turnout: Option<f64>,
    pub women_candidates_pct: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatChange {
    pub party: String,
    pub year1_seats: i64,
    pub year2_seats: i64,
    pub change: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateCorrelation {
    pub state: String,
    pub correlation: Option<f64>,
    pub avg_turnout: Option<f64>,
    pub avg_margin: Option<f64>,
    pub data_points: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryVoteShare {
    pub year: i32,
    pub category: PartyCategory,
    pub total_votes: i64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EducationWinRate {
    pub education: String,
    pub total_candidates: i64,
    pub winners: i64,
    pub win_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTurnout {
    pub state: String,
    pub avg_turnout: f64,
    pub constituencies: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyTurnout {
    pub year: i32,
    pub state: String,
    pub constituency_id: i64,
    pub constituency: String,
    pub winner: String,
    pub party: String,
    pub turnout_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WomenCandidatesRow {
    pub year: i32,
    pub women_candidates: i64,
    pub women_winners: i64,
    pub total_candidates: i64,
    pub women_pct: f64,
}
