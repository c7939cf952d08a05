pub mod join;
pub mod leave;
pub mod members;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::JoinClassRequest;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学员通过加入码加入班级
    pub async fn join_class(
        &self,
        request: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        join::join_class(self, request, join_data).await
    }

    // 学员退出班级
    pub async fn leave_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        leave::leave_class(self, request, class_id).await
    }

    // 列出班级成员（仅拥有者）
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, request, class_id).await
    }

    // 拥有者移除学员
    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        class_id: i64,
        learner_id: i64,
    ) -> ActixResult<HttpResponse> {
        remove::remove_member(self, request, class_id, learner_id).await
    }
}
