pub mod create;
pub mod delete;
pub mod due_date;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateDueDateRequest};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 布置作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, class_id, assignment_data).await
    }

    // 列出班级作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, class_id).await
    }

    // 修改作业截止时间
    pub async fn update_due_date(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
        update_data: UpdateDueDateRequest,
    ) -> ActixResult<HttpResponse> {
        due_date::update_due_date(self, request, class_id, assignment_id, update_data).await
    }

    // 删除作业及其提交
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, class_id, assignment_id).await
    }
}

/// 作业必须属于指定班级，跨班级 ID 视为不存在
pub(crate) async fn ensure_assignment_in_class(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    assignment_id: i64,
) -> Result<crate::models::assignments::entities::Assignment, HttpResponse> {
    use crate::models::{ApiResponse, ErrorCode};

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if assignment.class_id == class_id => Ok(assignment),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Assignment not found or access denied",
        ))),
        Err(e) => {
            tracing::error!("Assignment lookup failed: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            )
        }
    }
}
