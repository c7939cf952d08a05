use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.health_snapshot().await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot, "ok"))),
        Err(e) => {
            error!("Health check failed: {e}");
            let degraded = HealthResponse {
                status: "degraded".to_string(),
                database: "unreachable".to_string(),
                users: 0,
                classes: 0,
                assignments: 0,
                submissions: 0,
            };
            Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                ErrorCode::InternalServerError,
                degraded,
                "Database is unreachable",
            )))
        }
    }
}
