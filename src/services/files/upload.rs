use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::utils::validate_magic_bytes;

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let user_id = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 文件相关信息
    let mut original_name = String::new();
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut content: Vec<u8> = Vec::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParams,
                    "Only one file can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并按白名单校验
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase())
                .unwrap_or_default();

            if !allowed_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&extension))
            {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }

            // MIME 类型只做记录，不做校验依据
            file_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_default();

            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &format!(".{extension}")) {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "File content does not match its extension",
                        )));
                    }
                }

                if content.len() + data.len() > max_size {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTooLarge,
                        "File size exceeds the limit",
                    )));
                }
                content.extend_from_slice(&data);
            }
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "No file found in upload payload",
        )));
    }

    let stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let download_token = Uuid::new_v4().to_string();

    let blobs = service.get_blobs(req);
    if let Err(e) = blobs.put(&stored_name, &content).await {
        tracing::error!("{e}");
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Failed to store file content",
            )),
        );
    }

    let storage = service.get_storage(req);
    match storage
        .create_file_record(
            &download_token,
            &original_name,
            &stored_name,
            content.len() as i64,
            &file_type,
            user_id,
        )
        .await
    {
        Ok(file) => {
            let response = FileUploadResponse {
                download_token: file.download_token,
                file_name: file.file_name,
                size: file.file_size,
                content_type: file.file_type,
                uploaded_at: file.uploaded_at,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "File uploaded successfully")))
        }
        Err(e) => {
            // 元数据落库失败时回收已写入的内容
            let _ = blobs.delete(&stored_name).await;
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to upload file: {e}"),
                )),
            )
        }
    }
}
