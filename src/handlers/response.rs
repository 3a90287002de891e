use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Envelope shared by every JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub payload: Option<T>,
    pub error: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, payload: Option<T>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            payload,
            error: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>, error: Option<Value>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            payload: None,
            error,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
