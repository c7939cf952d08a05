use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课关系：学员与班级的一等关联，(class_id, learner_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub learner_id: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
