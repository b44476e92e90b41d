use actix_web::{HttpResponse, Result};
use chrono::Utc;
use shared_types::HealthResponse;

pub const LIVENESS_BODY: &str = "Bot is running";

pub async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_BODY))
}

pub async fn health_check() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    Ok(HttpResponse::Ok().json(response))
}
