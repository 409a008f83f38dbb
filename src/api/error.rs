use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DataError;

/// The two error kinds the API exposes.
///
/// Anything the data layer refuses becomes `NotAcceptable` (406); a missing
/// key on a keyed operation becomes `NotFound` (404). Clients see no finer
/// distinction.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotAcceptable(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn not_acceptable(msg: impl Into<String>) -> Self {
        Self::NotAcceptable(msg.into())
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        Self::NotAcceptable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
        };
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
