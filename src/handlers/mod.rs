pub mod cake;
pub mod health;
pub mod response;
pub mod tracker;

use std::any::Any;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    BoxError, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use self::tracker::TrackerId;
use crate::constants::REQUEST_ID_HEADER;
use crate::error::AppError;
use crate::repository::CakeRepository;
use crate::service::CakeService;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers(AnyOrigin)
        .expose_headers(AnyOrigin)
        .max_age(Duration::from_secs(60))
}

fn request_span(request: &Request) -> Span {
    let tracker_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        tracker_id = %tracker_id
    )
}

async fn request_failed(TrackerId(tracker_id): TrackerId, err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout { tracker_id }
    } else {
        AppError::Internal {
            tracker_id: Some(tracker_id),
            detail: err.to_string(),
        }
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal {
        tracker_id: None,
        detail,
    }
    .into_response()
}

/// Full application router: routes, request ids, tracing, the per-request
/// timeout, panic recovery and CORS. Dropping a timed-out request also drops
/// its in-flight statement.
pub fn app<R>(service: CakeService<R>, request_timeout: Duration) -> Router
where
    R: CakeRepository + Clone + 'static,
{
    Router::new()
        .merge(health::router())
        .nest("/cakes", cake::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(HandleErrorLayer::new(request_failed))
                .timeout(request_timeout)
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(cors()),
        )
        .with_state(service)
}
