//! 班级访问权限检查
//!
//! 跨租户访问统一返回 404 "not found or access denied"，不泄露资源存在性。

use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::error;

use crate::models::classes::entities::Class;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

fn not_found_or_denied() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFoundOrDenied,
        "Class not found or access denied",
    ))
}

fn internal_error(e: impl std::fmt::Display) -> HttpResponse {
    error!("Class permission check failed: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Internal server error",
    ))
}

/// 班级必须存在且由 `uid` 拥有
pub(crate) async fn ensure_class_owner(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    uid: i64,
) -> Result<Class, HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) if class.owner_id == uid => Ok(class),
        Ok(_) => Err(not_found_or_denied()),
        Err(e) => Err(internal_error(e)),
    }
}

/// 班级必须存在且 `uid` 是拥有者或已加入的学员
pub(crate) async fn ensure_class_access(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    uid: i64,
) -> Result<Class, HttpResponse> {
    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Err(not_found_or_denied()),
        Err(e) => return Err(internal_error(e)),
    };

    if class.owner_id == uid {
        return Ok(class);
    }

    match storage.get_enrollment(class_id, uid).await {
        Ok(Some(_)) => Ok(class),
        Ok(None) => Err(not_found_or_denied()),
        Err(e) => Err(internal_error(e)),
    }
}

/// 归档班级拒绝一切内容变更
pub(crate) fn ensure_not_archived(class: &Class) -> Result<(), HttpResponse> {
    if class.archived {
        Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassArchived,
            "Class is archived",
        )))
    } else {
        Ok(())
    }
}
