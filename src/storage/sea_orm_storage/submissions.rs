//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::serialize_attachments;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::Entity as Users;
use crate::errors::{LearnSyncError, Result};
use crate::models::submissions::{
    entities::{Submission, SubmissionState},
    requests::SubmitAssignmentRequest,
    responses::{SubmissionListItem, SubmissionListResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交/重交作业
    ///
    /// 覆盖仅作用于未评分的记录；已评分的记录返回 `None`，
    /// `grade IS NULL` 条件保证并发评分时不会覆盖成绩。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        learner_id: i64,
        req: SubmitAssignmentRequest,
    ) -> Result<Option<(Submission, bool)>> {
        let now = chrono::Utc::now().timestamp();
        let attachments = serialize_attachments(&req.attachments);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询提交失败: {e}")))?;

        let (submission_id, created) = match existing {
            None => {
                let model = ActiveModel {
                    assignment_id: Set(assignment_id),
                    learner_id: Set(learner_id),
                    content: Set(req.content),
                    attachments: Set(attachments),
                    submitted_at: Set(now),
                    ..Default::default()
                };

                let inserted = model
                    .insert(&txn)
                    .await
                    .map_err(|e| LearnSyncError::database_operation(format!("创建提交失败: {e}")))?;

                (inserted.id, true)
            }
            Some(existing) => {
                let result = Submissions::update_many()
                    .col_expr(Column::Content, sea_orm::sea_query::Expr::value(req.content))
                    .col_expr(
                        Column::Attachments,
                        sea_orm::sea_query::Expr::value(attachments),
                    )
                    .col_expr(Column::SubmittedAt, sea_orm::sea_query::Expr::value(now))
                    .filter(Column::Id.eq(existing.id))
                    .filter(Column::Grade.is_null())
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        LearnSyncError::database_operation(format!("更新提交失败: {e}"))
                    })?;

                if result.rows_affected == 0 {
                    // 已评分，拒绝覆盖
                    txn.rollback().await.map_err(|e| {
                        LearnSyncError::database_operation(format!("回滚事务失败: {e}"))
                    })?;
                    return Ok(None);
                }

                (existing.id, false)
            }
        };

        let saved = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| LearnSyncError::database_operation("提交写入后未找到记录"))?;

        txn.commit()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((saved.into_submission(), created)))
    }

    /// 获取学员在某作业下的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 撤回未评分的提交
    ///
    /// `grade IS NULL` 条件保证与评分并发时已评分的记录不会被删除。
    pub async fn delete_submission_if_ungraded_impl(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<bool> {
        let result = Submissions::delete_many()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::LearnerId.eq(learner_id))
                    .add(Column::Grade.is_null()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("撤回提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 评分/改分
    pub async fn set_grade_impl(
        &self,
        submission_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(Column::Grade, sea_orm::sea_query::Expr::value(grade))
            .col_expr(Column::Feedback, sea_orm::sea_query::Expr::value(feedback))
            .col_expr(Column::GradedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("评分失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let saved = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(saved.map(|m| m.into_submission()))
    }

    /// 列出作业下的全部提交（教师视角，关联学员信息）
    pub async fn list_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionListResponse> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询提交列表失败: {e}")))?;

        let items: Vec<SubmissionListItem> = rows
            .into_iter()
            .filter_map(|(submission, user)| {
                let user = user?.into_user();
                let learner_name = user.display_name();
                let submission = submission.into_submission();
                Some(SubmissionListItem {
                    id: submission.id,
                    learner_id: submission.learner_id,
                    learner_name,
                    learner_email: user.email,
                    state: SubmissionState::of(Some(&submission)),
                    content: submission.content,
                    attachments: submission.attachments,
                    submitted_at: submission.submitted_at,
                    grade: submission.grade,
                    feedback: submission.feedback,
                    graded_at: submission.graded_at,
                })
            })
            .collect();

        let total = items.len() as i64;

        Ok(SubmissionListResponse { items, total })
    }
}
