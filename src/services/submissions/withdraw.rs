use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubmissionService, transition_denied_response};
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::SubmissionState;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::assignments::ensure_assignment_in_class;
use crate::services::classes::ensure_class_access;

pub async fn withdraw(
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

    let assignment = match ensure_assignment_in_class(&storage, class_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    // 状态机检查：存在性 > 已评分 > 截止
    let existing = match storage.get_submission(assignment_id, uid).await {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to withdraw: {e}"),
                )),
            );
        }
    };

    let state = SubmissionState::of(existing.as_ref());
    if let Err(denied) = state.check_withdraw(chrono::Utc::now(), assignment.due_date) {
        return Ok(transition_denied_response(denied));
    }

    // 条件删除，评分并发时已评分的行不会被删掉
    match storage
        .delete_submission_if_ungraded(assignment_id, uid)
        .await
    {
        Ok(true) => {
            info!(
                "Learner {} withdrew submission for assignment {}",
                uid, assignment_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Submission withdrawn successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyGraded,
            "Submission already graded",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to withdraw: {e}"),
            )),
        ),
    }
}
