use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::ensure_class_owner;

pub async fn list_members(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
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

    if let Err(resp) = ensure_class_owner(&storage, class_id, uid).await {
        return Ok(resp);
    }

    match storage.list_class_members(class_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Class members retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list class members: {e}"),
            )),
        ),
    }
}
