use serde::Serialize;
use ts_rs::TS;

// 班级成员（含学员展示信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/enrollment.ts")]
pub struct ClassMember {
    pub learner_id: i64,
    pub email: String,
    pub display_name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 成员列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/enrollment.ts")]
pub struct ClassMemberListResponse {
    pub items: Vec<ClassMember>,
    pub total: i64,
}
