pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;
pub mod withdraw;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::entities::TransitionDenied;
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitAssignmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 提交/重交作业
    pub async fn submit(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
        submit_data: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, class_id, assignment_id, submit_data).await
    }

    // 撤回提交
    pub async fn withdraw(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        withdraw::withdraw(self, request, class_id, assignment_id).await
    }

    // 学员查看自己的提交
    pub async fn get_own_submission(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_own_submission(self, request, class_id, assignment_id).await
    }

    // 评分/改分
    pub async fn grade(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
        learner_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade(self, request, class_id, assignment_id, learner_id, grade_data).await
    }

    // 教师列出作业下全部提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, class_id, assignment_id).await
    }
}

/// 状态迁移拒绝原因到 HTTP 响应的统一映射
pub(crate) fn transition_denied_response(denied: TransitionDenied) -> HttpResponse {
    match denied {
        TransitionDenied::ClassArchived => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassArchived, "Class is archived"),
        ),
        TransitionDenied::DeadlinePassed => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DeadlinePassed, "Deadline has passed"),
        ),
        TransitionDenied::AlreadyGraded => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadyGraded, "Submission already graded"),
        ),
        TransitionDenied::NoSubmission => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SubmissionNotFound, "Submission not found"),
        ),
    }
}
