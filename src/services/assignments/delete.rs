use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, ensure_assignment_in_class};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{ensure_class_owner, ensure_not_archived};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment_id: i64,
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

    let class = match ensure_class_owner(&storage, class_id, uid).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = ensure_not_archived(&class) {
        return Ok(resp);
    }

    if let Err(resp) = ensure_assignment_in_class(&storage, class_id, assignment_id).await {
        return Ok(resp);
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!(
                "Assignment {} and its submissions deleted from class {} by {}",
                assignment_id, class_id, uid
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Assignment not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete assignment: {e}"),
            )),
        ),
    }
}
