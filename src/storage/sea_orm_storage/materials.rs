//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::entity::serialize_attachments;
use crate::errors::{LearnSyncError, Result};
use crate::models::materials::{entities::Material, requests::CreateMaterialRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 发布资料
    pub async fn create_material_impl(
        &self,
        class_id: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            title: Set(req.title),
            description: Set(req.description),
            deadline: Set(req.deadline.map(|d| d.timestamp())),
            resource_link: Set(req.resource_link),
            attachments: Set(serialize_attachments(&req.attachments)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出班级资料，最新的排在前面
    pub async fn list_materials_impl(&self, class_id: i64) -> Result<Vec<Material>> {
        let rows = Materials::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_material()).collect())
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
