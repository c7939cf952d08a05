//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::materials::{Column as MaterialColumn, Entity as Materials};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LearnSyncError, Result};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::random_code::generate_class_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 加入码生成的最大尝试次数，唯一索引兜底
const MAX_CODE_ATTEMPTS: usize = 5;

impl SeaOrmStorage {
    /// 创建班级，自动生成唯一加入码
    pub async fn create_class_impl(&self, owner_id: i64, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let mut last_err = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_class_code();

            // 预检降低唯一索引冲突概率，冲突仍由索引兜底
            let taken = Classes::find()
                .filter(Column::Code.eq(&code))
                .count(&self.db)
                .await
                .map_err(|e| LearnSyncError::database_operation(format!("查询加入码失败: {e}")))?;
            if taken > 0 {
                continue;
            }

            let model = ActiveModel {
                owner_id: Set(owner_id),
                name: Set(req.name.clone()),
                description: Set(req.description.clone()),
                code: Set(code),
                archived: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_class()),
                Err(e) => last_err = Some(e),
            }
        }

        Err(LearnSyncError::database_operation(format!(
            "创建班级失败，加入码生成重试耗尽: {:?}",
            last_err
        )))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过加入码获取班级
    pub async fn get_class_by_code_impl(&self, code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出教师拥有的班级
    pub async fn list_owned_classes_impl(
        &self,
        owner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let select = Classes::find()
            .filter(Column::OwnerId.eq(owner_id))
            .filter(Column::Archived.eq(query.archived))
            .order_by_desc(Column::CreatedAt);

        self.paginate_classes(select, query).await
    }

    /// 分页列出学员加入的班级
    pub async fn list_enrolled_classes_impl(
        &self,
        learner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let class_ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::LearnerId.eq(learner_id))
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询选课记录失败: {e}")))?;

        if class_ids.is_empty() {
            let page = query.page.max(1);
            let size = query.size.clamp(1, 100);
            return Ok(ClassListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page,
                    page_size: size,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let select = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .filter(Column::Archived.eq(query.archived))
            .order_by_desc(Column::CreatedAt);

        self.paginate_classes(select, query).await
    }

    async fn paginate_classes(
        &self,
        select: sea_orm::Select<Classes>,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 归档/取消归档班级
    pub async fn set_class_archived_impl(
        &self,
        class_id: i64,
        archived: bool,
    ) -> Result<Option<Class>> {
        let now = chrono::Utc::now().timestamp();

        let result = Classes::update_many()
            .col_expr(Column::Archived, sea_orm::sea_query::Expr::value(archived))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("归档班级失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，事务内级联删除选课、资料、作业与提交
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("开启事务失败: {e}")))?;

        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .select_only()
            .column(AssignmentColumn::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询班级作业失败: {e}")))?;

        if !assignment_ids.is_empty() {
            Submissions::delete_many()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
                .exec(&txn)
                .await
                .map_err(|e| LearnSyncError::database_operation(format!("删除提交失败: {e}")))?;
        }

        Assignments::delete_many()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除作业失败: {e}")))?;

        Materials::delete_many()
            .filter(MaterialColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除资料失败: {e}")))?;

        Enrollments::delete_many()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除选课记录失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
