//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod blobs;
pub mod classes;
pub mod enrollments;
pub mod files;
pub mod materials;
pub mod submissions;
pub mod users;

/// 附件列在数据库中存为 JSON 文本，这里统一解析
pub(crate) fn parse_attachments(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

/// 附件列表写库前序列化为 JSON 文本，空列表存 NULL
pub(crate) fn serialize_attachments(attachments: &[String]) -> Option<String> {
    if attachments.is_empty() {
        None
    } else {
        serde_json::to_string(attachments).ok()
    }
}
