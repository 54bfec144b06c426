//! Seeded temporary databases for metric tests.

use crate::config::AnalyticsSettings;
use crate::election_store::{SqliteElectionStore, ELECTION_VERSIONED_SCHEMAS};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use tempfile::TempDir;

/// One result row plus the reference rows it needs. Reference rows are
/// looked up by their natural key and created on first use.
#[derive(Clone, Debug)]
pub struct ResultFixture<'a> {
    pub year: i32,
    pub state: &'a str,
    pub constituency: &'a str,
    pub constituency_no: i64,
    pub candidate: &'a str,
    pub sex: Option<&'a str>,
    pub education: Option<&'a str>,
    pub party: &'a str,
    pub party_type: Option<&'a str>,
    pub position: i64,
    pub votes: i64,
    pub turnout: Option<f64>,
    pub vote_share: Option<f64>,
    pub margin: Option<f64>,
}

impl<'a> Default for ResultFixture<'a> {
    fn default() -> Self {
        ResultFixture {
            year: 2019,
            state: "Kerala",
            constituency: "Kollam",
            constituency_no: 1,
            candidate: "Candidate",
            sex: Some("M"),
            education: None,
            party: "IND",
            party_type: None,
            position: 1,
            votes: 1000,
            turnout: Some(70.0),
            vote_share: None,
            margin: None,
        }
    }
}

/// Constituency ids created by [`Seeder::namesake_districts`].
pub struct NamesakeSeats {
    pub bihar_aurangabad: i64,
    pub maharashtra_aurangabad: i64,
    pub gaya: i64,
}

pub struct Seeder {
    _dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl Seeder {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("elections.db");
        let conn = Connection::open(&path).unwrap();
        ELECTION_VERSIONED_SCHEMAS
            .last()
            .unwrap()
            .create(&conn)
            .unwrap();
        Seeder {
            _dir: dir,
            path,
            conn,
        }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Store over the seeded file where `min_results` rows make a year valid.
    pub fn store(&self, min_results: i64) -> SqliteElectionStore {
        self.store_with(AnalyticsSettings {
            valid_year_min_results: min_results,
            ..Default::default()
        })
    }

    pub fn store_with(&self, settings: AnalyticsSettings) -> SqliteElectionStore {
        SqliteElectionStore::new(&self.path, 2, settings).unwrap()
    }

    pub fn state(&self, name: &str) -> i64 {
        self.get_or_insert(
            "SELECT id FROM states WHERE name = ?1",
            "INSERT INTO states (name) VALUES (?1)",
            params![name],
        )
    }

    pub fn party(&self, name: &str, party_type: Option<&str>) -> i64 {
        if let Some(id) = self.lookup("SELECT id FROM parties WHERE name = ?1", params![name]) {
            return id;
        }
        self.conn
            .execute(
                "INSERT INTO parties (name, party_type_tcpd) VALUES (?1, ?2)",
                params![name, party_type],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn constituency(&self, state_id: i64, name: &str, no: i64) -> i64 {
        if let Some(id) = self.lookup(
            "SELECT id FROM constituencies WHERE state_id = ?1 AND name = ?2 AND constituency_no = ?3",
            params![state_id, name, no],
        ) {
            return id;
        }
        self.conn
            .execute(
                "INSERT INTO constituencies (state_id, name, constituency_no, constituency_type) \
                 VALUES (?1, ?2, ?3, 'GEN')",
                params![state_id, name, no],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn election(&self, year: i32) -> i64 {
        if let Some(id) = self.lookup("SELECT id FROM elections WHERE year = ?1", params![year]) {
            return id;
        }
        self.conn
            .execute(
                "INSERT INTO elections (year, month, poll_no, delimid, election_type) \
                 VALUES (?1, 5, 0, 4, 'GE')",
                params![year],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn candidate(&self, name: &str, sex: Option<&str>, education: Option<&str>) -> i64 {
        if let Some(id) = self.lookup("SELECT id FROM candidates WHERE name = ?1", params![name]) {
            return id;
        }
        self.conn
            .execute(
                "INSERT INTO candidates (name, sex, myneta_education) VALUES (?1, ?2, ?3)",
                params![name, sex, education],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn result(&self, fixture: ResultFixture<'_>) -> i64 {
        let state_id = self.state(fixture.state);
        let constituency_id =
            self.constituency(state_id, fixture.constituency, fixture.constituency_no);
        let election_id = self.election(fixture.year);
        let candidate_id = self.candidate(fixture.candidate, fixture.sex, fixture.education);
        let party_id = self.party(fixture.party, fixture.party_type);
        self.conn
            .execute(
                "INSERT INTO results (election_id, constituency_id, candidate_id, party_id, \
                 position, votes, turnout_percentage, vote_share_percentage, margin_percentage) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    election_id,
                    constituency_id,
                    candidate_id,
                    party_id,
                    fixture.position,
                    fixture.votes,
                    fixture.turnout,
                    fixture.vote_share,
                    fixture.margin,
                ],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    /// Two "Aurangabad" seats in different states plus one other seat in
    /// 2019, each with a winner and a runner-up:
    ///
    /// | state       | seat       | winner / votes  | runner-up / votes |
    /// |-------------|------------|-----------------|-------------------|
    /// | Bihar       | Aurangabad | JD(U) 400       | INC 100           |
    /// | Maharashtra | Aurangabad | AIMIM 300       | SHS 200           |
    /// | Bihar       | Gaya       | BJP 1000        | INC 500           |
    pub fn namesake_districts(&self) -> NamesakeSeats {
        let rows = [
            ("Bihar", "Aurangabad", 37, "Bihar Winner", "JD(U)", 1, 400),
            ("Bihar", "Aurangabad", 37, "Bihar Runner", "INC", 2, 100),
            ("Maharashtra", "Aurangabad", 19, "Marathwada Winner", "AIMIM", 1, 300),
            ("Maharashtra", "Aurangabad", 19, "Marathwada Runner", "SHS", 2, 200),
            ("Bihar", "Gaya", 38, "Gaya Winner", "BJP", 1, 1000),
            ("Bihar", "Gaya", 38, "Gaya Runner", "INC", 2, 500),
        ];
        for (state, constituency, no, candidate, party, position, votes) in rows {
            self.result(ResultFixture {
                state,
                constituency,
                constituency_no: no,
                candidate,
                party,
                position,
                votes,
                ..ResultFixture::default()
            });
        }
        let bihar = self.state("Bihar");
        let maharashtra = self.state("Maharashtra");
        NamesakeSeats {
            bihar_aurangabad: self.constituency(bihar, "Aurangabad", 37),
            maharashtra_aurangabad: self.constituency(maharashtra, "Aurangabad", 19),
            gaya: self.constituency(bihar, "Gaya", 38),
        }
    }

    /// Adds `rows` losing candidacies in `year`, spread over synthetic seats
    /// in a separate state. Used to push a year over the validity threshold.
    pub fn filler(&self, year: i32, rows: usize) {
        let tx = self.conn.unchecked_transaction().unwrap();
        let state_id = self.state("Filler State");
        let election_id = self.election(year);
        let party_id = self.party("Filler Party", None);
        let candidate_id = self.candidate("Filler Candidate", None, None);
        for i in 0..rows {
            let constituency_id =
                self.constituency(state_id, &format!("Filler {}", i / 10), (i / 10) as i64);
            self.conn
                .execute(
                    "INSERT INTO results (election_id, constituency_id, candidate_id, party_id, \
                     position, votes) VALUES (?1, ?2, ?3, ?4, ?5, 0)",
                    params![
                        election_id,
                        constituency_id,
                        candidate_id,
                        party_id,
                        3 + (i % 10) as i64
                    ],
                )
                .unwrap();
        }
        tx.commit().unwrap();
    }

    fn lookup(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Option<i64> {
        self.conn
            .query_row(sql, params, |r| r.get(0))
            .optional()
            .unwrap()
    }

    fn get_or_insert(&self, select: &str, insert: &str, params: &[&dyn rusqlite::ToSql]) -> i64 {
        if let Some(id) = self.lookup(select, params) {
            return id;
        }
        self.conn.execute(insert, params).unwrap();
        self.conn.last_insert_rowid()
    }
}
