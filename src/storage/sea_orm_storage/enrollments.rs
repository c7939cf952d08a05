//! 选课关系存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::Entity as Users;
use crate::errors::{LearnSyncError, Result};
use crate::models::enrollments::{
    entities::Enrollment,
    responses::{ClassMember, ClassMemberListResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学员加入班级
    pub async fn create_enrollment_impl(
        &self,
        class_id: i64,
        learner_id: i64,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            learner_id: Set(learner_id),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("加入班级失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 学员退出/被移出班级
    pub async fn delete_enrollment_impl(&self, class_id: i64, learner_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("退出班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取学员在班级中的选课记录
    pub async fn get_enrollment_impl(
        &self,
        class_id: i64,
        learner_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 列出班级成员，关联学员展示信息
    pub async fn list_class_members_impl(&self, class_id: i64) -> Result<ClassMemberListResponse> {
        let rows = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::JoinedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级成员失败: {e}")))?;

        let items: Vec<ClassMember> = rows
            .into_iter()
            .filter_map(|(enrollment, user)| {
                let user = user?.into_user();
                let display_name = user.display_name();
                let enrollment = enrollment.into_enrollment();
                Some(ClassMember {
                    learner_id: user.id,
                    email: user.email,
                    display_name,
                    joined_at: enrollment.joined_at,
                })
            })
            .collect();

        let total = items.len() as i64;

        Ok(ClassMemberListResponse { items, total })
    }
}
