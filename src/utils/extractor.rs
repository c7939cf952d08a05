//! 路径参数安全提取器
//!
//! 在进入处理函数之前完成路径参数的解析与格式校验，
//! 非法参数统一返回 400 + InvalidParams。

use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidParams, message)),
    )
    .into()
}

fn extract_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, Error> {
    req.match_info()
        .get(param)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_request(&format!("Invalid path parameter: {param}")))
}

macro_rules! define_path_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                ready(extract_positive_i64(req, $param).map($name))
            }
        }
    };
}

define_path_id_extractor!(SafeClassIdI64, "class_id");
define_path_id_extractor!(SafeAssignmentIdI64, "assignment_id");
define_path_id_extractor!(SafeMaterialIdI64, "material_id");
define_path_id_extractor!(SafeLearnerIdI64, "learner_id");

/// 文件下载 token 提取器
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("token")
            .filter(|s| {
                !s.is_empty()
                    && s.len() <= 64
                    && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            })
            .map(|s| SafeFileToken(s.to_string()))
            .ok_or_else(|| bad_request("Invalid file token"));
        ready(result)
    }
}
