use axum::{response::Json, routing::get, Router};
use serde_json::json;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}

async fn banner() -> &'static str {
    "🍰 cake api 🔥"
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Cake API is healthy"
    }))
}
