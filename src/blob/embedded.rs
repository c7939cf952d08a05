use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use super::BlobStore;
use crate::entity::blobs::{ActiveModel, Column, Entity as Blobs};
use crate::errors::{LearnSyncError, Result};

/// 数据库内后端，内容存入 blobs 表
pub struct EmbeddedBlobStore {
    db: DatabaseConnection,
}

impl EmbeddedBlobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlobStore for EmbeddedBlobStore {
    async fn put(&self, stored_name: &str, data: &[u8]) -> Result<()> {
        let model = ActiveModel {
            stored_name: Set(stored_name.to_string()),
            data: Set(data.to_vec()),
        };

        Blobs::insert(model)
            .on_conflict(
                OnConflict::column(Column::StoredName)
                    .update_column(Column::Data)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("写入文件内容失败: {e}")))?;

        Ok(())
    }

    async fn get(&self, stored_name: &str) -> Result<Vec<u8>> {
        let row = Blobs::find_by_id(stored_name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("读取文件内容失败: {e}")))?;

        row.map(|m| m.data)
            .ok_or_else(|| LearnSyncError::not_found(format!("文件内容不存在: {stored_name}")))
    }

    async fn delete(&self, stored_name: &str) -> Result<()> {
        Blobs::delete_by_id(stored_name.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("删除文件内容失败: {e}")))?;
        Ok(())
    }
}
