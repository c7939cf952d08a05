use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 归档过滤：true 仅归档，false 仅未归档，缺省为 false
    pub archived: Option<bool>,
}

// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
}

// 更新班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 归档/取消归档请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/class.ts")]
pub struct ArchiveClassRequest {
    pub archived: bool,
}

// 通过加入码加入班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/class.ts")]
pub struct JoinClassRequest {
    pub code: String,
}

// 班级列表查询参数（用于存储层，page/size 缺省已在反序列化时填好）
#[derive(Debug, Clone)]
pub struct ClassListQuery {
    pub page: i64,
    pub size: i64,
    pub archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_from_http_params() {
        // 服务层直接用反序列化后的分页值构造存储层查询
        let params: ClassQueryParams =
            serde_json::from_str(r#"{"page": 2, "size": 20}"#).expect("参数解析失败");

        let query = ClassListQuery {
            page: params.pagination.page,
            size: params.pagination.size,
            archived: params.archived.unwrap_or(false),
        };
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 20);
        assert!(!query.archived);

        // 缺省分页
        let params: ClassQueryParams = serde_json::from_str("{}").expect("参数解析失败");
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.pagination.size, 10);
    }
}
