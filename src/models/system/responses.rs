use serde::Serialize;
use ts_rs::TS;

/// 健康检查响应（含各实体计数）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub users: i64,
    pub classes: i64,
    pub assignments: i64,
    pub submissions: i64,
}

/// 教师工作台统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/system.ts")]
pub struct InstructorStatsResponse {
    /// 未归档班级数
    pub active_classes: i64,
    /// 去重后的学员总数
    pub total_learners: i64,
    /// 截止时间在未来的作业数
    pub pending_tasks: i64,
}

/// 学员工作台统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/generated/system.ts")]
pub struct LearnerStatsResponse {
    /// 已加入的未归档班级数
    pub enrolled_classes: i64,
    /// 所在班级中截止时间在未来且尚未提交的作业数
    pub pending_tasks: i64,
    /// 已评分提交数
    pub graded_submissions: i64,
}
