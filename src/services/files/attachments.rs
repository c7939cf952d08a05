//! 附件 token 归属校验
//!
//! 资料、作业与提交中的附件都以文件下载 token 引用，
//! 引用前必须确认 token 有效且文件属于当前用户。

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) async fn ensure_attachments_owned(
    storage: &Arc<dyn Storage>,
    attachments: &[String],
    uid: i64,
) -> Result<(), HttpResponse> {
    for token in attachments {
        match storage.get_file_by_token(token).await {
            Ok(Some(file)) if file.user_id == uid => {}
            Ok(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParams,
                    format!("Invalid attachment token: {token}"),
                )));
            }
            Err(e) => {
                tracing::error!("Attachment check failed: {}", e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error",
                    )),
                );
            }
        }
    }
    Ok(())
}
