use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::ensure_class_owner;

pub async fn remove_member(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    learner_id: i64,
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

    match storage.delete_enrollment(class_id, learner_id).await {
        Ok(true) => {
            info!(
                "Learner {} removed from class {} by owner {}",
                learner_id, class_id, uid
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Member removed successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFoundOrDenied,
            "Member not found in this class",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to remove member: {e}"),
            )),
        ),
    }
}
