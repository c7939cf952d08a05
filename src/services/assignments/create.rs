use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{ensure_class_owner, ensure_not_archived};
use crate::services::files::attachments::ensure_attachments_owned;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment_data: CreateAssignmentRequest,
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

    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Assignment title must not be empty",
        )));
    }

    if assignment_data.points <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Assignment points must be positive",
        )));
    }

    if let Err(resp) = ensure_attachments_owned(&storage, &assignment_data.attachments, uid).await {
        return Ok(resp);
    }

    match storage.create_assignment(class_id, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in class {} by {}",
                assignment.id, class_id, uid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )),
        ),
    }
}
