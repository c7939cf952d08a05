use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::responses::SubmissionView;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::assignments::ensure_assignment_in_class;
use crate::services::classes::ensure_class_access;

pub async fn get_own_submission(
    service: &SubmissionService,
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

    if let Err(resp) = ensure_class_access(&storage, class_id, uid).await {
        return Ok(resp);
    }

    if let Err(resp) = ensure_assignment_in_class(&storage, class_id, assignment_id).await {
        return Ok(resp);
    }

    match storage.get_submission(assignment_id, uid).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionView::from_submission(submission),
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get submission: {e}"),
            )),
        ),
    }
}
