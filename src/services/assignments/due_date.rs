use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, ensure_assignment_in_class};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::UpdateDueDateRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{ensure_class_owner, ensure_not_archived};

pub async fn update_due_date(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment_id: i64,
    update_data: UpdateDueDateRequest,
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

    match storage
        .update_assignment_due_date(assignment_id, update_data)
        .await
    {
        Ok(Some(assignment)) => {
            info!(
                "Assignment {} due date moved to {} by {}",
                assignment_id, assignment.due_date, uid
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Due date updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Assignment not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update due date: {e}"),
            )),
        ),
    }
}
