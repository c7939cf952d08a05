use serde::Deserialize;
use ts_rs::TS;

// 提交作业请求（创建或覆盖更新）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct SubmitAssignmentRequest {
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: f64,
    pub feedback: Option<String>,
}
