use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/file.ts")]
pub struct File {
    // 文件的下载 token，对外唯一标识
    pub download_token: String,
    // 原始文件名
    pub file_name: String,
    // 存储后端内部名称，不对外暴露
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub stored_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 文件类型
    pub file_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    // 上传者ID
    pub user_id: i64,
}
