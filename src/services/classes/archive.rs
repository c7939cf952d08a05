use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, ensure_class_owner};
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::ArchiveClassRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn archive_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    archive_data: ArchiveClassRequest,
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

    match storage
        .set_class_archived(class_id, archive_data.archived)
        .await
    {
        Ok(Some(class)) => {
            info!(
                "Class {} {} by {}",
                class_id,
                if class.archived { "archived" } else { "unarchived" },
                uid
            );
            let message = if class.archived {
                "Class archived successfully"
            } else {
                "Class unarchived successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Class not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to archive class: {e}"),
            )),
        ),
    }
}
