use serde::Deserialize;
use ts_rs::TS;

fn default_points() -> i64 {
    100
}

// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(default)]
    pub attachments: Vec<String>,
}

// 修改截止时间请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/assignment.ts")]
pub struct UpdateDueDateRequest {
    pub due_date: chrono::DateTime<chrono::Utc>,
}
