use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use validator::Validate;

use super::response::ApiResponse;
use super::tracker::TrackerId;
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Cake, CakeRequest, FindAllRequest};
use crate::repository::CakeRepository;
use crate::service::CakeService;

pub fn router<R>() -> Router<CakeService<R>>
where
    R: CakeRepository + Clone + 'static,
{
    Router::new()
        .route("/", get(find_all_cakes::<R>).post(add_cake::<R>))
        .route(
            "/:id",
            get(find_cake::<R>)
                .patch(update_cake::<R>)
                .delete(delete_cake::<R>),
        )
}

fn decode_body(body: Result<Json<CakeRequest>, JsonRejection>) -> Result<CakeRequest, AppError> {
    let Json(req) = body?;
    req.validate()?;
    Ok(req)
}

async fn find_cake<R: CakeRepository>(
    State(service): State<CakeService<R>>,
    TrackerId(tracker_id): TrackerId,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Cake>, AppError> {
    let Path(id) = id?;
    match service.find(id).await {
        Ok(cake) => Ok(ApiResponse::ok("search cake found", Some(cake))),
        Err(e) if e.is_not_found() => Ok(ApiResponse::ok("search cake not found", None)),
        Err(e) => Err(AppError::service(tracker_id, e)),
    }
}

async fn find_all_cakes<R: CakeRepository>(
    State(service): State<CakeService<R>>,
    TrackerId(tracker_id): TrackerId,
    query: Result<Query<FindAllRequest>, QueryRejection>,
) -> Result<ApiResponse<Vec<Cake>>, AppError> {
    let Query(req) = query?;
    match service.find_all(Some(&req)).await {
        Ok(cakes) => Ok(ApiResponse::ok("search cakes found", Some(cakes))),
        Err(e) if e.is_not_found() => Ok(ApiResponse::ok("search cakes not found", None)),
        Err(e) => Err(AppError::service(tracker_id, e)),
    }
}

async fn add_cake<R: CakeRepository>(
    State(service): State<CakeService<R>>,
    TrackerId(tracker_id): TrackerId,
    body: Result<Json<CakeRequest>, JsonRejection>,
) -> Result<ApiResponse<Value>, AppError> {
    let mut req = decode_body(body)?;

    service
        .insert(Some(&mut req))
        .await
        .map_err(|e| AppError::service(tracker_id, e))?;

    tracing::info!("{} Added cake {}", API_NAME, req.id);
    Ok(ApiResponse::ok("adding new cake", Some(json!({ "id": req.id }))))
}

async fn update_cake<R: CakeRepository>(
    State(service): State<CakeService<R>>,
    TrackerId(tracker_id): TrackerId,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CakeRequest>, JsonRejection>,
) -> Result<ApiResponse<Value>, AppError> {
    let Path(id) = id?;
    let mut req = decode_body(body)?;
    req.id = id;

    match service.update(Some(&req)).await {
        Ok(()) => tracing::info!("{} Updated cake {}", API_NAME, id),
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(AppError::service(tracker_id, e)),
    }

    Ok(ApiResponse::ok("updating a cake", Some(json!({ "id": id }))))
}

async fn delete_cake<R: CakeRepository>(
    State(service): State<CakeService<R>>,
    TrackerId(tracker_id): TrackerId,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Value>, AppError> {
    let Path(id) = id?;
    match service.delete(id).await {
        Ok(()) => tracing::info!("{} Deleted cake {}", API_NAME, id),
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(AppError::service(tracker_id, e)),
    }

    Ok(ApiResponse::ok("deleting a cake", Some(json!({ "id": id }))))
}
