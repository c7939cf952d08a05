use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::JoinClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::random_code::is_valid_class_code;

pub async fn join_class(
    service: &EnrollmentService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
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

    let code = join_data.code.trim().to_uppercase();
    if !is_valid_class_code(&code) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Invalid join code format",
        )));
    }

    // 1. 按加入码定位班级
    let class = match storage.get_class_by_code(&code).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFoundOrDenied,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to join class: {e}"),
                )),
            );
        }
    };

    // 2. 归档班级不接受新成员
    if class.archived {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassArchived,
            "Class is archived",
        )));
    }

    // 3. 重复加入检查
    match storage.get_enrollment(class.id, uid).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this class",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to join class: {e}"),
                )),
            );
        }
    }

    match storage.create_enrollment(class.id, uid).await {
        Ok(enrollment) => {
            info!("Learner {} joined class {}", uid, class.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Joined class successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to join class: {e}"),
            )),
        ),
    }
}
