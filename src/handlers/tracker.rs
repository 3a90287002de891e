use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::constants::REQUEST_ID_HEADER;

/// The request id assigned by the request-id layer, used to correlate an
/// error response with its log line. Empty when the layer is not installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerId(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for TrackerId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        Ok(Self(id.to_string()))
    }
}
