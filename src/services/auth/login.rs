use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CacheResult, ObjectCache};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::UserStatus,
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

fn attempts_key(email: &str) -> String {
    format!("login_attempts:{email}")
}

fn lock_key(email: &str) -> String {
    format!("login_lock:{email}")
}

/// 查询账户是否处于锁定状态
async fn is_locked(cache: &Arc<dyn ObjectCache>, email: &str) -> bool {
    !matches!(cache.get_raw(&lock_key(email)).await, CacheResult::NotFound)
}

/// 记录一次失败尝试，达到上限后写入锁定标记
async fn record_failed_attempt(cache: &Arc<dyn ObjectCache>, email: &str) {
    let config = crate::config::AppConfig::get();
    let attempts = match cache.get_raw(&attempts_key(email)).await {
        CacheResult::Found(raw) => raw.parse::<u32>().unwrap_or(0),
        _ => 0,
    } + 1;

    if attempts >= config.auth.max_login_attempts {
        cache
            .insert_raw(
                lock_key(email),
                attempts.to_string(),
                config.auth.lockout_duration_secs,
            )
            .await;
        cache.remove(&attempts_key(email)).await;
        tracing::warn!("Account {} locked after {} failed login attempts", email, attempts);
    } else {
        cache
            .insert_raw(
                attempts_key(email),
                attempts.to_string(),
                config.auth.lockout_duration_secs,
            )
            .await;
    }
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::InvalidCredentials,
        "Email or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let config = service.get_config();

    // 1. 锁定检查先于任何凭据校验
    if is_locked(&cache, &login_request.email).await {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AccountLocked,
            "Account temporarily locked due to repeated failed logins, try again later",
        )));
    }

    // 2. 根据邮箱获取用户信息
    match storage.get_user_by_email(&login_request.email).await {
        Ok(Some(user)) => {
            // 3. 验证密码
            if verify_password(&login_request.password, &user.password_hash) {
                if user.status != UserStatus::Active {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "Account is suspended",
                    )));
                }

                // 成功登录清空失败计数
                cache.remove(&attempts_key(&login_request.email)).await;

                // 4. 更新最后登录时间
                let _ = storage.update_last_login(user.id).await;

                // 5. 生成令牌对
                match user
                    .generate_token_pair(login_request.remember_me.then(|| {
                        chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
                    }))
                    .await
                {
                    Ok(token_pair) => {
                        tracing::info!("User {} logged in successfully", user.email);

                        let response = LoginResponse {
                            access_token: token_pair.access_token,
                            expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                            user,
                            created_at: chrono::Utc::now(),
                        };

                        // 6. 创建 refresh token cookie
                        let refresh_cookie =
                            jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                        Ok(HttpResponse::Ok()
                            .cookie(refresh_cookie)
                            .json(ApiResponse::success(response, "Login successful")))
                    }
                    Err(e) => {
                        tracing::error!("Failed to generate JWT token: {}", e);
                        Ok(
                            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                "Login failed, unable to generate token",
                            )),
                        )
                    }
                }
            } else {
                record_failed_attempt(&cache, &login_request.email).await;
                Ok(invalid_credentials())
            }
        }
        Ok(None) => {
            // 不存在的邮箱同样计入失败，避免枚举探测绕过锁定
            record_failed_attempt(&cache, &login_request.email).await;
            Ok(invalid_credentials())
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}
