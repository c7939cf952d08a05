use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{ensure_class_owner, ensure_not_archived};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    class_id: i64,
    material_id: i64,
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

    // 资料必须属于该班级，跨班级 ID 视为不存在
    match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) if material.class_id == class_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFoundOrDenied,
                "Material not found or access denied",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete material: {e}"),
                )),
            );
        }
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {
            info!("Material {} deleted from class {} by {}", material_id, class_id, uid);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Material deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Material not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete material: {e}"),
            )),
        ),
    }
}
