use serde::Serialize;
use ts_rs::TS;

/// 上传成功响应
#[derive(Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/file.ts")]
pub struct FileUploadResponse {
    /// 下载 token
    pub download_token: String,
    /// 原始文件名
    pub file_name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// 文件类型
    pub content_type: String,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
