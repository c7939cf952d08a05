use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::{Submission, SubmissionState};

/// 学员视角的提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct SubmissionView {
    pub state: SubmissionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<Submission>,
}

impl SubmissionView {
    pub fn from_submission(submission: Option<Submission>) -> Self {
        Self {
            state: SubmissionState::of(submission.as_ref()),
            submission,
        }
    }
}

/// 提交/重交响应，标明本次是创建还是覆盖
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct SubmitResponse {
    pub submission: Submission,
    pub created: bool,
}

/// 提交列表项（教师视角，含学员展示信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub learner_id: i64,
    pub learner_name: String,
    pub learner_email: String,
    pub content: String,
    pub attachments: Vec<String>,
    pub state: SubmissionState,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub total: i64,
}
