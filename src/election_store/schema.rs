//! SQLite schema for the Lok Sabha results database.
//!
//! Six tables: `states`, `parties`, `constituencies`, `elections`,
//! `candidates` and the `results` fact table. Rows are written once by the
//! external import step and never touched by the server.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const STATE_FK: ForeignKey = ForeignKey {
    foreign_table: "states",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ELECTION_FK: ForeignKey = ForeignKey {
    foreign_table: "elections",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const CONSTITUENCY_FK: ForeignKey = ForeignKey {
    foreign_table: "constituencies",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const CANDIDATE_FK: ForeignKey = ForeignKey {
    foreign_table: "candidates",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PARTY_FK: ForeignKey = ForeignKey {
    foreign_table: "parties",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const STATES_TABLE: Table = Table {
    name: "states",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

const PARTIES_TABLE: Table = Table {
    name: "parties",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("party_type_tcpd", &SqlType::Text), // free text, bucketed at query time
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

/// Constituencies sharing `name` are the same district across delimitations.
const CONSTITUENCIES_TABLE: Table = Table {
    name: "constituencies",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "state_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&STATE_FK)
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("constituency_no", &SqlType::Integer),
        sqlite_column!("constituency_type", &SqlType::Text), // 'GEN', 'SC', 'ST'
        sqlite_column!("sub_region", &SqlType::Text),
        sqlite_column!("assembly_no", &SqlType::Integer),
    ],
    indices: &[
        ("idx_constituencies_name", "name"),
        ("idx_constituencies_state", "state_id"),
    ],
    unique_constraints: &[&["state_id", "name", "constituency_no"]],
};

const ELECTIONS_TABLE: Table = Table {
    name: "elections",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("month", &SqlType::Integer),
        sqlite_column!("poll_no", &SqlType::Integer),
        sqlite_column!("delimid", &SqlType::Integer),
        sqlite_column!("election_type", &SqlType::Text),
    ],
    indices: &[("idx_elections_year", "year")],
    unique_constraints: &[&["year", "month", "poll_no", "delimid"]],
};

/// Identity is the name; homonymous people collapse into one row.
const CANDIDATES_TABLE: Table = Table {
    name: "candidates",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("sex", &SqlType::Text), // 'M', 'F', 'O' or NULL
        sqlite_column!("myneta_education", &SqlType::Text),
        sqlite_column!("tcpd_prof_main", &SqlType::Text),
        sqlite_column!("tcpd_prof_main_desc", &SqlType::Text),
        sqlite_column!("tcpd_prof_second", &SqlType::Text),
        sqlite_column!("tcpd_prof_second_desc", &SqlType::Text),
        sqlite_column!("pid", &SqlType::Text),
    ],
    indices: &[("idx_candidates_name", "name")],
    unique_constraints: &[],
};

const RESULTS_TABLE: Table = Table {
    name: "results",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "election_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ELECTION_FK)
        ),
        sqlite_column!(
            "constituency_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONSTITUENCY_FK)
        ),
        sqlite_column!(
            "candidate_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CANDIDATE_FK)
        ),
        sqlite_column!(
            "party_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PARTY_FK)
        ),
        sqlite_column!("position", &SqlType::Integer), // 1 = winner, 2 = runner-up
        sqlite_column!("votes", &SqlType::Integer),
        sqlite_column!("turnout_percentage", &SqlType::Real),
        sqlite_column!("vote_share_percentage", &SqlType::Real),
        sqlite_column!("margin_percentage", &SqlType::Real),
        sqlite_column!("valid_votes", &SqlType::Integer),
        sqlite_column!("electors", &SqlType::Integer),
        sqlite_column!("deposit_lost", &SqlType::Integer),
    ],
    indices: &[
        ("idx_results_election", "election_id"),
        ("idx_results_contest", "election_id, constituency_id, position"),
        ("idx_results_constituency", "constituency_id"),
        ("idx_results_candidate", "candidate_id"),
        ("idx_results_party", "party_id"),
    ],
    // Namesakes contesting the same seat share a candidate row, so no
    // (election, constituency, candidate) uniqueness here.
    unique_constraints: &[],
};

pub const ELECTION_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[
        STATES_TABLE,
        PARTIES_TABLE,
        CONSTITUENCIES_TABLE,
        ELECTIONS_TABLE,
        CANDIDATES_TABLE,
        RESULTS_TABLE,
    ],
}];

/// Names of every table, in creation order. Used for dataset size metrics.
pub const TABLE_NAMES: &[&str] = &[
    "states",
    "parties",
    "constituencies",
    "elections",
    "candidates",
    "results",
];
