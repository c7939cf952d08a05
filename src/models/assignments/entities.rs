use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    // 截止时间，必填；截止后不再接受提交与撤回
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 满分，正数，默认 100
    pub points: i64,
    // 附件下载 token 列表
    pub attachments: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
