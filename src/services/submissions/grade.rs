use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::assignments::ensure_assignment_in_class;
use crate::services::classes::ensure_class_owner;
use crate::utils::validate_grade;

pub async fn grade(
    service: &SubmissionService,
    request: &HttpRequest,
    class_id: i64,
    assignment_id: i64,
    learner_id: i64,
    grade_data: GradeSubmissionRequest,
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

    // 评分不受归档限制，只要求教师拥有该班级
    if let Err(resp) = ensure_class_owner(&storage, class_id, uid).await {
        return Ok(resp);
    }

    let assignment = match ensure_assignment_in_class(&storage, class_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    // 被评分学员必须仍在班级中
    match storage.get_enrollment(class_id, learner_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidParams,
                "Learner is not enrolled in this class",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to grade submission: {e}"),
                )),
            );
        }
    }

    let submission = match storage.get_submission(assignment_id, learner_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to grade submission: {e}"),
                )),
            );
        }
    };

    if let Err(message) = validate_grade(grade_data.grade, assignment.points) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeOutOfRange, message)));
    }

    // 允许改分：无条件覆盖已有成绩
    match storage
        .set_grade(submission.id, grade_data.grade, grade_data.feedback)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Instructor {} graded submission {} (assignment {}, learner {}): {}",
                uid, graded.id, assignment_id, learner_id, grade_data.grade
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(graded, "Submission graded successfully")))
        }
        // 评分与撤回并发竞争时的兜底
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to grade submission: {e}"),
            )),
        ),
    }
}
