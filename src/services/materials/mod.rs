pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::CreateMaterialRequest;
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    // 发布资料
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        class_id: i64,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, class_id, material_data).await
    }

    // 列出班级资料
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, class_id).await
    }

    // 删除资料
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        class_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, class_id, material_id).await
    }
}
