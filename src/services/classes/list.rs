use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
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

    // 归档过滤是严格等值过滤，缺省只看未归档
    let list_query = ClassListQuery {
        page: query.pagination.page,
        size: query.pagination.size,
        archived: query.archived.unwrap_or(false),
    };

    let result = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Instructor) => storage.list_owned_classes(uid, list_query).await,
        Some(UserRole::Learner) => storage.list_enrolled_classes(uid, list_query).await,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user role",
            )));
        }
    };

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list classes: {e}"),
            )),
        ),
    }
}
