//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the seeded election data changes, update only this file.

// ============================================================================
// Seeded Dataset
// ============================================================================

/// Result rows a year needs before it counts as valid in the test server.
pub const TEST_VALID_YEAR_MIN_RESULTS: i64 = 5;

/// Earlier election year, fully seeded
pub const YEAR_2014: i32 = 2014;

/// Later election year, fully seeded
pub const YEAR_2019: i32 = 2019;

/// Year with a single result row, below the validity threshold
pub const SPARSE_YEAR: i32 = 2009;

pub const KERALA_ID: i64 = 1;
pub const GOA_ID: i64 = 2;

pub const BJP_ID: i64 = 1;
pub const INC_ID: i64 = 2;
pub const CPIM_ID: i64 = 3;
pub const IND_ID: i64 = 4;

pub const KOLLAM_ID: i64 = 1;
pub const THRISSUR_ID: i64 = 2;
pub const NORTH_GOA_ID: i64 = 3;
pub const SOUTH_GOA_ID: i64 = 4;

/// Result rows seeded per fully seeded year
pub const ROWS_PER_YEAR: i64 = 9;

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the test server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
