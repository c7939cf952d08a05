use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode, auth::requests::RegisterRequest, users::requests::CreateUserParams,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 校验邮箱格式
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg))
        );
    }

    // 2. 校验密码策略
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    // 3. 检查邮箱是否已被占用
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EmailTaken,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    // 4. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Register failed",
                )),
            );
        }
    };

    // 5. 创建用户
    let params = CreateUserParams {
        email: register_request.email,
        password_hash,
        first_name: register_request.first_name,
        last_name: register_request.last_name,
        role: register_request.role,
    };

    match storage.create_user(params).await {
        Ok(user) => {
            tracing::info!("User {} registered as {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Register successful")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
