use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::middlewares::RequireJWT;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{ensure_class_owner, ensure_not_archived};
use crate::services::files::attachments::ensure_attachments_owned;

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    class_id: i64,
    material_data: CreateMaterialRequest,
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

    if material_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Material title must not be empty",
        )));
    }

    if let Err(resp) = ensure_attachments_owned(&storage, &material_data.attachments, uid).await {
        return Ok(resp);
    }

    match storage.create_material(class_id, material_data).await {
        Ok(material) => {
            info!("Material {} created in class {} by {}", material.id, class_id, uid);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(material, "Material created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create material: {e}"),
            )),
        ),
    }
}
