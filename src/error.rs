//! Error taxonomy for recommendation and catalog queries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommenderError {
    /// A required request field is absent.
    #[error("Missing '{0}'")]
    MissingField(String),

    /// The field is present but cannot be interpreted.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("An error occurred: {0}")]
    Internal(String),
}

impl RecommenderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecommenderError::MissingField(_) | RecommenderError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            RecommenderError::NotFound(_) => StatusCode::NOT_FOUND,
            RecommenderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecommenderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
