use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::BlobStore;
use crate::errors::{LearnSyncError, Result};

/// 本地目录后端
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(dir: &str) -> Result<Self> {
        let root = PathBuf::from(dir);
        std::fs::create_dir_all(&root)
            .map_err(|e| LearnSyncError::file_operation(format!("创建上传目录失败: {e}")))?;
        debug!("FsBlobStore initialized at {}", root.display());
        Ok(Self { root })
    }

    fn path_of(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, stored_name: &str, data: &[u8]) -> Result<()> {
        tokio::fs::write(self.path_of(stored_name), data)
            .await
            .map_err(|e| LearnSyncError::file_operation(format!("写入文件失败: {e}")))
    }

    async fn get(&self, stored_name: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(self.path_of(stored_name)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                LearnSyncError::not_found(format!("文件内容不存在: {stored_name}")),
            ),
            Err(e) => Err(LearnSyncError::file_operation(format!("读取文件失败: {e}"))),
        }
    }

    async fn delete(&self, stored_name: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_of(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LearnSyncError::file_operation(format!("删除文件失败: {e}"))),
        }
    }
}
