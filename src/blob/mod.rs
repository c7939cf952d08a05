//! 文件内容存储层
//!
//! 元数据始终在 files 表，内容通过 `BlobStore` 存取。
//! 后端按 `upload.backend` 配置选择：`fs`（本地目录）或 `embedded`（数据库内）。

pub mod embedded;
pub mod fs;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::errors::{LearnSyncError, Result};

/// 文件内容存取接口，键为存储名（上传时生成的 uuid）
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, stored_name: &str, data: &[u8]) -> Result<()>;
    async fn get(&self, stored_name: &str) -> Result<Vec<u8>>;
    async fn delete(&self, stored_name: &str) -> Result<()>;
}

/// 按配置创建文件内容后端
pub fn create_blob_store(db: &DatabaseConnection) -> Result<Arc<dyn BlobStore>> {
    let config = AppConfig::get();
    match config.upload.backend.as_str() {
        "fs" => Ok(Arc::new(fs::FsBlobStore::new(&config.upload.dir)?)),
        "embedded" => Ok(Arc::new(embedded::EmbeddedBlobStore::new(db.clone()))),
        other => Err(LearnSyncError::blob_backend_not_found(format!(
            "未知的文件存储后端: {other}"
        ))),
    }
}
