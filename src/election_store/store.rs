//! SQLite-backed election store.
//!
//! The database is filled by an external import step; the server only ever
//! reads it through a fixed pool of read-only connections.

use super::models::{
    Constituency, DatasetCounts, District, Party, ResultRow, SearchHit, SearchScope, State,
};
use super::schema::{ELECTION_VERSIONED_SCHEMAS, TABLE_NAMES};
use super::trait_def::ElectionStore;
use crate::analytics::{
    self, AnalyticsError, CategoryVoteShare, ConstituencyTurnout, ContestMargin,
    EducationWinRate, GenderTrendRow, Kpis, MetricFilters, PartySeats, SeatChange,
    StateCorrelation, StateTurnout, VoteShareMode, VoteShareReport, WomenCandidatesRow,
};
use crate::config::AnalyticsSettings;
use crate::sqlite_persistence::{VersionedSchema, BASE_DB_VERSION};
use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub struct SqliteElectionStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    read_index: Arc<AtomicUsize>,
    settings: AnalyticsSettings,
}

/// Creates the latest schema on an empty file, otherwise checks the file
/// matches the schema version it declares.
fn prepare_schema(db_path: &Path) -> Result<()> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .context("Failed to open election database")?;

    let latest_schema = ELECTION_VERSIONED_SCHEMAS
        .last()
        .context("No election schema declared")?;

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!(
            "Creating election db schema at version {}",
            latest_schema.version
        );
        latest_schema.create(&conn)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        return Ok(());
    }

    // Importers that do not stamp user_version are checked against the
    // latest schema.
    let schema = match VersionedSchema::read_version(&conn)? {
        Some(version) => match ELECTION_VERSIONED_SCHEMAS
            .iter()
            .find(|s| s.version == version)
        {
            Some(schema) => schema,
            None => bail!(
                "Election database has unknown schema version {} (user_version {})",
                version,
                BASE_DB_VERSION + version
            ),
        },
        None => {
            warn!("Election database carries no schema version, validating against latest");
            latest_schema
        }
    };

    schema
        .validate(&conn)
        .with_context(|| format!("Election database does not match schema v{}", schema.version))
}

impl SqliteElectionStore {
    /// Opens (or creates) the election database at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of read-only connections shared by all requests
    /// * `settings` - Metric engine tunables
    pub fn new<P: AsRef<Path>>(
        db_path: P,
        read_pool_size: usize,
        settings: AnalyticsSettings,
    ) -> Result<Self> {
        let db_path_ref = db_path.as_ref();
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        prepare_schema(db_path_ref)?;

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .context("Failed to open election database read connection")?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteElectionStore {
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
            settings,
        };

        let counts = store.dataset_counts()?;
        info!(
            "Opened election database: {} elections, {} constituencies, {} candidates, {} results",
            counts.get("elections").unwrap_or(0),
            counts.get("constituencies").unwrap_or(0),
            counts.get("candidates").unwrap_or(0),
            counts.get("results").unwrap_or(0),
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    /// Runs `f` on one pooled connection, held for the duration of the call.
    ///
    /// Do not call `read` again from inside `f`: with a pool of one the
    /// nested call would wait on the connection it already holds.
    pub fn read<T, F>(&self, f: F) -> Result<T, AnalyticsError>
    where
        F: FnOnce(&Connection) -> Result<T, AnalyticsError>,
    {
        let conn = self.get_read_conn();
        let guard = conn.lock().map_err(|_| {
            AnalyticsError::StoreUnavailable("read connection lock poisoned".to_string())
        })?;
        f(&guard)
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    pub fn dataset_counts(&self) -> Result<DatasetCounts, AnalyticsError> {
        self.read(|conn| {
            let mut counts = Vec::with_capacity(TABLE_NAMES.len());
            for table in TABLE_NAMES {
                let count: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                        r.get(0)
                    })?;
                counts.push((table.to_string(), count));
            }
            Ok(DatasetCounts { counts })
        })
    }
}

impl ElectionStore for SqliteElectionStore {
    fn seat_share(&self, filters: &MetricFilters) -> Result<Vec<PartySeats>, AnalyticsError> {
        analytics::seat_share(self, filters)
    }

    fn vote_share(
        &self,
        filters: &MetricFilters,
        mode: VoteShareMode,
    ) -> Result<VoteShareReport, AnalyticsError> {
        analytics::vote_share(self, filters, mode)
    }

    fn gender_trend(&self, filters: &MetricFilters) -> Result<Vec<GenderTrendRow>, AnalyticsError> {
        analytics::gender_trend(self, filters)
    }

    fn margins(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
    ) -> Result<Vec<ContestMargin>, AnalyticsError> {
        analytics::margins(self, filters, limit)
    }

    fn closest_contests(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<ContestMargin>, AnalyticsError> {
        analytics::closest_contests(self, filters)
    }

    fn kpis(&self, filters: &MetricFilters) -> Result<Kpis, AnalyticsError> {
        analytics::kpis(self, filters)
    }

    fn seat_changes(
        &self,
        year1: Option<i32>,
        year2: Option<i32>,
        filters: &MetricFilters,
    ) -> Result<Vec<SeatChange>, AnalyticsError> {
        analytics::seat_changes(self, year1, year2, filters)
    }

    fn turnout_margin_correlation(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<StateCorrelation>, AnalyticsError> {
        analytics::turnout_margin_correlation(self, filters)
    }

    fn national_vs_regional(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<CategoryVoteShare>, AnalyticsError> {
        analytics::national_vs_regional(self, filters)
    }

    fn education_win_rates(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<EducationWinRate>, AnalyticsError> {
        analytics::education_win_rates(self, filters)
    }

    fn turnout_by_state(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<StateTurnout>, AnalyticsError> {
        analytics::turnout_by_state(self, filters)
    }

    fn highest_turnout(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
    ) -> Result<Vec<ConstituencyTurnout>, AnalyticsError> {
        analytics::highest_turnout(self, filters, limit)
    }

    fn women_candidates(
        &self,
        filters: &MetricFilters,
    ) -> Result<Vec<WomenCandidatesRow>, AnalyticsError> {
        analytics::women_candidates(self, filters)
    }

    fn valid_years(&self) -> Result<Vec<i32>, AnalyticsError> {
        analytics::valid_years(self)
    }

    fn states(&self) -> Result<Vec<State>, AnalyticsError> {
        analytics::states(self)
    }

    fn parties(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Party>, AnalyticsError> {
        analytics::parties(self, limit, offset)
    }

    fn districts(
        &self,
        state: Option<i64>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<District>, AnalyticsError> {
        analytics::districts(self, state, limit, offset)
    }

    fn constituencies(
        &self,
        state: Option<i64>,
        district: Option<i64>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Constituency>, AnalyticsError> {
        analytics::constituencies(self, state, district, limit, offset)
    }

    fn results(
        &self,
        filters: &MetricFilters,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ResultRow>, AnalyticsError> {
        analytics::results(self, filters, limit, offset)
    }

    fn search(
        &self,
        query: &str,
        scope: SearchScope,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<SearchHit>, AnalyticsError> {
        analytics::search(self, query, scope, limit, offset)
    }

    fn dataset_counts(&self) -> Result<DatasetCounts, AnalyticsError> {
        SqliteElectionStore::dataset_counts(self)
    }
}
