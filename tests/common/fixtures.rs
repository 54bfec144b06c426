//! Test fixture creation for the election database
//!
//! The store opens the database read-only, so the schema is created by a
//! throwaway store and the data goes in through direct SQL inserts.

use super::constants::*;
use anyhow::Result;
use election_analytics_server::config::AnalyticsSettings;
use election_analytics_server::election_store::SqliteElectionStore;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

struct SeedResult {
    year: i32,
    constituency_id: i64,
    candidate_id: i64,
    party_id: i64,
    position: i64,
    votes: i64,
    turnout: f64,
    margin: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
fn row(
    year: i32,
    constituency_id: i64,
    candidate_id: i64,
    party_id: i64,
    position: i64,
    votes: i64,
    turnout: f64,
    margin: Option<f64>,
) -> SeedResult {
    SeedResult {
        year,
        constituency_id,
        candidate_id,
        party_id,
        position,
        votes,
        turnout,
        margin,
    }
}

/// (id, name, sex, education)
const CANDIDATES: &[(i64, &str, &str, Option<&str>)] = &[
    (1, "N. K. Premachandran", "M", Some("Graduate")),
    (2, "K. N. Balagopal", "M", Some("Post Graduate")),
    (3, "T. N. Prathapan", "M", Some("Graduate")),
    (4, "Rajaji Mathew Thomas", "M", Some("Post Graduate")),
    (5, "Shripad Naik", "M", Some("12th Pass")),
    (6, "Girish Chodankar", "M", Some("Graduate")),
    (7, "Francisco Sardinha", "M", Some("Graduate")),
    (8, "Narendra Sawaikar", "M", Some("Post Graduate")),
    (9, "Shilpa Naik", "F", None),
    (10, "M. A. Baby", "M", Some("Graduate")),
    (11, "C. N. Jayadevan", "M", Some("  ")),
    (12, "K. P. Dhanapalan", "M", Some("Graduate")),
    (13, "Ravi Naik", "M", Some("10th Pass")),
    (14, "Alexio Reginaldo", "M", Some("Graduate")),
    (15, "Swati Kerkar", "F", Some("Graduate")),
];

/// Nine rows for each full year, one for the sparse year.
fn results() -> Vec<SeedResult> {
    vec![
        // 2019
        row(2019, KOLLAM_ID, 1, INC_ID, 1, 500_000, 74.0, Some(15.0)),
        row(2019, KOLLAM_ID, 2, CPIM_ID, 2, 350_000, 74.0, Some(15.0)),
        row(2019, THRISSUR_ID, 3, INC_ID, 1, 415_000, 77.0, Some(9.0)),
        row(2019, THRISSUR_ID, 4, CPIM_ID, 2, 321_000, 77.0, Some(9.0)),
        row(2019, NORTH_GOA_ID, 5, BJP_ID, 1, 244_000, 77.5, Some(20.0)),
        row(2019, NORTH_GOA_ID, 6, INC_ID, 2, 164_000, 77.5, Some(20.0)),
        row(2019, SOUTH_GOA_ID, 7, INC_ID, 1, 201_000, 75.0, Some(1.5)),
        row(2019, SOUTH_GOA_ID, 8, BJP_ID, 2, 191_000, 75.0, Some(1.5)),
        row(2019, SOUTH_GOA_ID, 9, IND_ID, 3, 5_000, 75.0, None),
        // 2014
        row(2014, KOLLAM_ID, 1, INC_ID, 1, 408_000, 72.0, Some(3.0)),
        row(2014, KOLLAM_ID, 10, CPIM_ID, 2, 370_000, 72.0, Some(3.0)),
        row(2014, THRISSUR_ID, 11, CPIM_ID, 1, 389_000, 72.2, Some(3.9)),
        row(2014, THRISSUR_ID, 12, INC_ID, 2, 350_000, 72.2, Some(3.9)),
        row(2014, NORTH_GOA_ID, 5, BJP_ID, 1, 237_000, 75.0, Some(26.0)),
        row(2014, NORTH_GOA_ID, 13, INC_ID, 2, 131_000, 75.0, Some(26.0)),
        row(2014, SOUTH_GOA_ID, 8, BJP_ID, 1, 198_000, 76.0, Some(3.0)),
        row(2014, SOUTH_GOA_ID, 14, INC_ID, 2, 166_000, 76.0, Some(3.0)),
        row(2014, SOUTH_GOA_ID, 15, IND_ID, 3, 3_000, 76.0, None),
        // 2009, below the validity threshold
        row(2009, KOLLAM_ID, 1, INC_ID, 1, 300_000, 65.0, Some(5.0)),
    ]
}

/// Creates a temporary election database with two states, four
/// constituencies and results for 2014, 2019 and a sparse 2009.
/// Returns (temp_dir, db_path)
pub fn create_test_db() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("elections.db");

    // Initialize the store (creates schema)
    {
        let _store = SqliteElectionStore::new(&db_path, 1, AnalyticsSettings::default())?;
    }

    let conn = Connection::open(&db_path)?;
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO states (id, name) VALUES (?1, 'Kerala'), (?2, 'Goa')",
        params![KERALA_ID, GOA_ID],
    )?;

    for (id, name, party_type) in [
        (BJP_ID, "BJP", Some("National Party")),
        (INC_ID, "INC", Some("National Party")),
        (CPIM_ID, "CPI(M)", Some("Regional Party")),
        (IND_ID, "IND", None),
    ] {
        tx.execute(
            "INSERT INTO parties (id, name, party_type_tcpd) VALUES (?1, ?2, ?3)",
            params![id, name, party_type],
        )?;
    }

    for (id, state_id, name, number) in [
        (KOLLAM_ID, KERALA_ID, "Kollam", 1),
        (THRISSUR_ID, KERALA_ID, "Thrissur", 2),
        (NORTH_GOA_ID, GOA_ID, "North Goa", 1),
        (SOUTH_GOA_ID, GOA_ID, "South Goa", 2),
    ] {
        tx.execute(
            "INSERT INTO constituencies (id, state_id, name, constituency_no, constituency_type)
             VALUES (?1, ?2, ?3, ?4, 'GEN')",
            params![id, state_id, name, number],
        )?;
    }

    for (id, year) in [(1, SPARSE_YEAR), (2, YEAR_2014), (3, YEAR_2019)] {
        tx.execute(
            "INSERT INTO elections (id, year, month, poll_no, delimid, election_type)
             VALUES (?1, ?2, 5, 0, 4, 'GE')",
            params![id, year],
        )?;
    }

    for (id, name, sex, education) in CANDIDATES {
        tx.execute(
            "INSERT INTO candidates (id, name, sex, myneta_education) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, sex, education],
        )?;
    }

    for result in results() {
        tx.execute(
            "INSERT INTO results (election_id, constituency_id, candidate_id, party_id,
                 position, votes, turnout_percentage, margin_percentage)
             VALUES ((SELECT id FROM elections WHERE year = ?1), ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                result.year,
                result.constituency_id,
                result.candidate_id,
                result.party_id,
                result.position,
                result.votes,
                result.turnout,
                result.margin,
            ],
        )?;
    }

    tx.commit()?;
    Ok((dir, db_path))
}
