use serde::Deserialize;
use ts_rs::TS;

// 创建资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub resource_link: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}
