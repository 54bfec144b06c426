//! HTTP mapping of metric engine errors.

use crate::analytics::AnalyticsError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub fn status_code(err: &AnalyticsError) -> StatusCode {
    match err {
        AnalyticsError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalyticsError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AnalyticsError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        match &self {
            AnalyticsError::Validation(_) => {}
            AnalyticsError::StoreUnavailable(_) => warn!("{}", self),
            AnalyticsError::Query(_) => error!("{}", self),
        }
        let message = match &self {
            AnalyticsError::Validation(msg)
            | AnalyticsError::StoreUnavailable(msg)
            | AnalyticsError::Query(msg) => msg.clone(),
        };
        let body = Json(ErrorBody {
            error: self.kind().to_string(),
            message,
        });
        (status, body).into_response()
    }
}

/// Malformed query strings (`year=abc`) get the same body as any other
/// validation failure.
pub fn from_query_rejection(rejection: QueryRejection) -> AnalyticsError {
    AnalyticsError::validation(rejection.body_text())
}
