use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 键存在但值不可用（后端故障或反序列化失败）
    ExistsButNoValue,
}

/// 对象缓存后端接口
///
/// 值统一为字符串，调用方自行负责序列化。ttl 为秒，0 表示使用后端默认值。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
