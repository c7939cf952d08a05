//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::serialize_attachments;
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LearnSyncError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateDueDateRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 布置作业
    pub async fn create_assignment_impl(
        &self,
        class_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            points: Set(req.points),
            attachments: Set(serialize_attachments(&req.attachments)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出班级作业，按截止时间升序
    pub async fn list_assignments_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let rows = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 修改作业截止时间
    pub async fn update_assignment_due_date_impl(
        &self,
        assignment_id: i64,
        update: UpdateDueDateRequest,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::DueDate,
                sea_orm::sea_query::Expr::value(update.due_date.timestamp()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("更新截止时间失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 删除作业，事务内级联删除提交
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除提交失败: {e}")))?;

        let result = Assignments::delete_by_id(assignment_id)
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
