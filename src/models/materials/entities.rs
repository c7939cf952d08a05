use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    // 可选的阅读截止时间，仅作展示，不做提交限制
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub resource_link: Option<String>,
    // 附件下载 token 列表
    pub attachments: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
