use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn dashboard_stats(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let role = match RequireJWT::extract_user_role(request) {
        Some(role) => role,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user role",
            )));
        }
    };

    match role {
        UserRole::Instructor => match storage.instructor_stats(uid).await {
            Ok(stats) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(stats, "Stats retrieved successfully"))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get stats: {e}"),
                )),
            ),
        },
        UserRole::Learner => match storage.learner_stats(uid).await {
            Ok(stats) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(stats, "Stats retrieved successfully"))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get stats: {e}"),
                )),
            ),
        },
    }
}
