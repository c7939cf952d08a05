//! 统计与健康检查查询

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::entity::users::Entity as Users;
use crate::errors::{LearnSyncError, Result};
use crate::models::system::responses::{
    HealthResponse, InstructorStatsResponse, LearnerStatsResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// 健康检查计数
    pub async fn health_snapshot_impl(&self) -> Result<HealthResponse> {
        let users = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计用户数量失败: {e}")))?;

        let classes = Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计班级数量失败: {e}")))?;

        let assignments = Assignments::find()
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计作业数量失败: {e}")))?;

        let submissions = Submissions::find()
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计提交数量失败: {e}")))?;

        Ok(HealthResponse {
            status: "ok".to_string(),
            database: "connected".to_string(),
            users: users as i64,
            classes: classes as i64,
            assignments: assignments as i64,
            submissions: submissions as i64,
        })
    }

    /// 教师工作台统计
    pub async fn instructor_stats_impl(&self, owner_id: i64) -> Result<InstructorStatsResponse> {
        // 未归档班级
        let active_class_ids: Vec<i64> = Classes::find()
            .filter(ClassColumn::OwnerId.eq(owner_id))
            .filter(ClassColumn::Archived.eq(false))
            .select_only()
            .column(ClassColumn::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级失败: {e}")))?;

        let active_classes = active_class_ids.len() as i64;

        if active_class_ids.is_empty() {
            return Ok(InstructorStatsResponse {
                active_classes: 0,
                total_learners: 0,
                pending_tasks: 0,
            });
        }

        // 去重后的学员总数
        let learner_ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::ClassId.is_in(active_class_ids.clone()))
            .select_only()
            .column(EnrollmentColumn::LearnerId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询选课记录失败: {e}")))?;

        let total_learners = learner_ids.into_iter().collect::<HashSet<_>>().len() as i64;

        // 截止时间在未来的作业
        let now = chrono::Utc::now().timestamp();
        let pending_tasks = Assignments::find()
            .filter(AssignmentColumn::ClassId.is_in(active_class_ids))
            .filter(AssignmentColumn::DueDate.gt(now))
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计作业数量失败: {e}")))?
            as i64;

        Ok(InstructorStatsResponse {
            active_classes,
            total_learners,
            pending_tasks,
        })
    }

    /// 学员工作台统计
    pub async fn learner_stats_impl(&self, learner_id: i64) -> Result<LearnerStatsResponse> {
        // 已评分提交数
        let graded_submissions = Submissions::find()
            .filter(SubmissionColumn::LearnerId.eq(learner_id))
            .filter(SubmissionColumn::Grade.is_not_null())
            .count(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("统计提交数量失败: {e}")))?
            as i64;

        // 已加入的未归档班级
        let enrolled_class_ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::LearnerId.eq(learner_id))
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrolled_class_ids.is_empty() {
            return Ok(LearnerStatsResponse {
                enrolled_classes: 0,
                pending_tasks: 0,
                graded_submissions,
            });
        }

        let active_class_ids: Vec<i64> = Classes::find()
            .filter(ClassColumn::Id.is_in(enrolled_class_ids))
            .filter(ClassColumn::Archived.eq(false))
            .select_only()
            .column(ClassColumn::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级失败: {e}")))?;

        let enrolled_classes = active_class_ids.len() as i64;

        if active_class_ids.is_empty() {
            return Ok(LearnerStatsResponse {
                enrolled_classes: 0,
                pending_tasks: 0,
                graded_submissions,
            });
        }

        // 截止时间在未来且尚未提交的作业
        let now = chrono::Utc::now().timestamp();
        let upcoming_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::ClassId.is_in(active_class_ids))
            .filter(AssignmentColumn::DueDate.gt(now))
            .select_only()
            .column(AssignmentColumn::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询作业失败: {e}")))?;

        let pending_tasks = if upcoming_ids.is_empty() {
            0
        } else {
            let submitted_ids: Vec<i64> = Submissions::find()
                .filter(SubmissionColumn::LearnerId.eq(learner_id))
                .filter(SubmissionColumn::AssignmentId.is_in(upcoming_ids.clone()))
                .select_only()
                .column(SubmissionColumn::AssignmentId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| LearnSyncError::database_operation(format!("查询提交失败: {e}")))?;

            let submitted: HashSet<i64> = submitted_ids.into_iter().collect();
            upcoming_ids
                .into_iter()
                .filter(|id| !submitted.contains(id))
                .count() as i64
        };

        Ok(LearnerStatsResponse {
            enrolled_classes,
            pending_tasks,
            graded_submissions,
        })
    }
}
