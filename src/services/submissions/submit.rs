use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubmissionService, transition_denied_response};
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::SubmissionState;
use crate::models::submissions::requests::SubmitAssignmentRequest;
use crate::models::submissions::responses::SubmitResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::assignments::ensure_assignment_in_class;
use crate::services::classes::ensure_class_access;
use crate::services::files::attachments::ensure_attachments_owned;

pub async fn submit(
    service: &SubmissionService,
    request: &HttpRequest,
    class_id: i64,
    assignment_id: i64,
    submit_data: SubmitAssignmentRequest,
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

    // 1. 学员必须在班级里，否则统一按不存在处理
    let class = match ensure_class_access(&storage, class_id, uid).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    // 2. 作业必须属于该班级
    let assignment = match ensure_assignment_in_class(&storage, class_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    // 3. 状态机检查：归档 > 截止 > 已评分
    let existing = match storage.get_submission(assignment_id, uid).await {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to submit: {e}"),
                )),
            );
        }
    };

    let state = SubmissionState::of(existing.as_ref());
    if let Err(denied) =
        state.check_submit(chrono::Utc::now(), assignment.due_date, class.archived)
    {
        return Ok(transition_denied_response(denied));
    }

    // 4. 附件归属校验
    if let Err(resp) = ensure_attachments_owned(&storage, &submit_data.attachments, uid).await {
        return Ok(resp);
    }

    // 5. 覆盖式写入，同一 (assignment, learner) 永不重复建行
    match storage.upsert_submission(assignment_id, uid, submit_data).await {
        Ok(Some((submission, created))) => {
            info!(
                "Learner {} {} submission for assignment {}",
                uid,
                if created { "created" } else { "updated" },
                assignment_id
            );
            let response = SubmitResponse { submission, created };
            let message = if created {
                "Submission created successfully"
            } else {
                "Submission updated successfully"
            };
            if created {
                Ok(HttpResponse::Created().json(ApiResponse::success(response, message)))
            } else {
                Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
            }
        }
        // 与评分并发竞争时的兜底
        Ok(None) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyGraded,
            "Submission already graded",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to submit: {e}"),
            )),
        ),
    }
}
