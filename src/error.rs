use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::constants::API_NAME;
use crate::handlers::response::ApiResponse;
use crate::service::ServiceError;

/// Failures surfaced by the HTTP handlers.
///
/// "Not found" is not in here: handlers answer it as a regular outcome.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("parse request body, an error occured")]
    BadRequest(#[from] JsonRejection),

    #[error("parse request path, an error occured")]
    InvalidPath(#[from] PathRejection),

    #[error("parse request query, an error occured")]
    InvalidQuery(#[from] QueryRejection),

    #[error("unprocessable request body, an error occured")]
    Validation(#[from] ValidationErrors),

    #[error("request timed out, an error occured")]
    Timeout { tracker_id: String },

    /// Middleware failures and handler panics. A panic has no tracker id at
    /// hand; its log line carries the one recorded on the request span.
    #[error("internal server error, an error occured")]
    Internal {
        tracker_id: Option<String>,
        detail: String,
    },

    #[error("{source}")]
    Service {
        tracker_id: String,
        #[source]
        source: ServiceError,
    },
}

impl AppError {
    pub fn service(tracker_id: impl Into<String>, source: ServiceError) -> Self {
        Self::Service {
            tracker_id: tracker_id.into(),
            source,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ValidationDetail {
    pub key: String,
    pub rule: String,
    pub message: String,
}

pub fn validation_details(errors: &ValidationErrors) -> Vec<ValidationDetail> {
    let mut details: Vec<ValidationDetail> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let key = field.to_string();
            errs.iter().map(move |e| ValidationDetail {
                key: key.clone(),
                rule: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", key)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.key.cmp(&b.key));
    details
}

fn bad_request(message: String, reason: String) -> Response {
    tracing::warn!("{} Request rejected: {}", API_NAME, reason);
    ApiResponse::<()>::error(StatusCode::BAD_REQUEST, message, None).into_response()
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::BadRequest(rejection) => bad_request(message, rejection.body_text()),
            AppError::InvalidPath(rejection) => bad_request(message, rejection.body_text()),
            AppError::InvalidQuery(rejection) => bad_request(message, rejection.body_text()),
            AppError::Validation(errors) => {
                let details = validation_details(&errors);
                tracing::warn!("{} Validation failed on {} field(s)", API_NAME, details.len());
                ApiResponse::<()>::error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                    Some(json!({ "validation": details })),
                )
                .into_response()
            }
            AppError::Service { tracker_id, source } => {
                tracing::error!(
                    tracker_id = %tracker_id,
                    error = %error_chain(&source),
                    "{} {}",
                    API_NAME,
                    message
                );
                ApiResponse::<()>::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    Some(json!({ "tracker_id": tracker_id })),
                )
                .into_response()
            }
            AppError::Timeout { tracker_id } => {
                tracing::error!(tracker_id = %tracker_id, "{} {}", API_NAME, message);
                ApiResponse::<()>::error(
                    StatusCode::REQUEST_TIMEOUT,
                    message,
                    Some(json!({ "tracker_id": tracker_id })),
                )
                .into_response()
            }
            AppError::Internal { tracker_id, detail } => {
                tracing::error!(error = %detail, "{} {}", API_NAME, message);
                ApiResponse::<()>::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    tracker_id.map(|id| json!({ "tracker_id": id })),
                )
                .into_response()
            }
        }
    }
}
