use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
    version: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Liveness payload on `GET /`.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Chunk API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}
