//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all analytics server endpoints.
//!
//! When API routes change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// Query parameters as (name, value) pairs
pub type Params<'a> = &'a [(&'a str, String)];

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET {base_url}{path} with the given query parameters
    pub async fn get(&self, path: &str, params: Params<'_>) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Home
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.get("/", &[]).await
    }

    // ========================================================================
    // Analytics Endpoints
    // ========================================================================

    /// GET /v1/analytics/seat-share
    pub async fn seat_share(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/seat-share", params).await
    }

    /// GET /v1/analytics/vote-share
    pub async fn vote_share(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/vote-share", params).await
    }

    /// GET /v1/analytics/gender-trend
    pub async fn gender_trend(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/gender-trend", params).await
    }

    /// GET /v1/analytics/margins
    pub async fn margins(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/margins", params).await
    }

    /// GET /v1/analytics/closest-contests
    pub async fn closest_contests(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/closest-contests", params).await
    }

    /// GET /v1/analytics/kpis
    pub async fn kpis(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/kpis", params).await
    }

    /// GET /v1/analytics/seat-changes
    pub async fn seat_changes(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/seat-changes", params).await
    }

    /// GET /v1/analytics/turnout-margin-correlation
    pub async fn turnout_margin_correlation(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/turnout-margin-correlation", params)
            .await
    }

    /// GET /v1/analytics/national-vs-regional
    pub async fn national_vs_regional(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/national-vs-regional", params).await
    }

    /// GET /v1/analytics/education-correlation
    pub async fn education_correlation(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/education-correlation", params).await
    }

    /// GET /v1/analytics/turnout
    pub async fn turnout(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/turnout", params).await
    }

    /// GET /v1/analytics/highest-turnout
    pub async fn highest_turnout(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/highest-turnout", params).await
    }

    /// GET /v1/analytics/women-candidates
    pub async fn women_candidates(&self, params: Params<'_>) -> Response {
        self.get("/v1/analytics/women-candidates", params).await
    }

    // ========================================================================
    // Data Endpoints
    // ========================================================================

    /// GET /v1/data/years
    pub async fn years(&self) -> Response {
        self.get("/v1/data/years", &[]).await
    }

    /// GET /v1/data/states
    pub async fn states(&self) -> Response {
        self.get("/v1/data/states", &[]).await
    }

    /// GET /v1/data/parties
    pub async fn parties(&self, params: Params<'_>) -> Response {
        self.get("/v1/data/parties", params).await
    }

    /// GET /v1/data/districts
    pub async fn districts(&self, params: Params<'_>) -> Response {
        self.get("/v1/data/districts", params).await
    }

    /// GET /v1/data/constituencies
    pub async fn constituencies(&self, params: Params<'_>) -> Response {
        self.get("/v1/data/constituencies", params).await
    }

    /// GET /v1/data/results
    pub async fn results(&self, params: Params<'_>) -> Response {
        self.get("/v1/data/results", params).await
    }

    /// GET /v1/search
    pub async fn search(&self, params: Params<'_>) -> Response {
        self.get("/v1/search", params).await
    }
}
