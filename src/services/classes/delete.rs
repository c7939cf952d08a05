use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, ensure_class_owner};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
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

    if let Err(resp) = ensure_class_owner(&storage, class_id, uid).await {
        return Ok(resp);
    }

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} and its contents deleted by {}", class_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Class deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Class not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete class: {e}"),
            )),
        ),
    }
}
