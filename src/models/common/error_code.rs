//! 业务错误码
//!
//! 按 HTTP 状态分组：4xxYY，YY 为组内编号。错误码对外稳定，新增只追加。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400 参数与校验
    BadRequest = 40000,
    InvalidParams = 40001,
    GradeOutOfRange = 40002,
    PasswordPolicyViolation = 40003,
    FileTypeNotAllowed = 40004,
    FileTooLarge = 40005,

    // 401 认证
    Unauthorized = 40100,
    InvalidCredentials = 40101,
    AccountLocked = 40102,

    // 403 授权
    Forbidden = 40300,

    // 404 未找到（跨租户访问统一使用 NotFoundOrDenied，不泄露资源存在性）
    NotFoundOrDenied = 40400,
    UserNotFound = 40401,
    FileNotFound = 40402,
    SubmissionNotFound = 40403,

    // 409 冲突
    Conflict = 40900,
    AlreadyEnrolled = 40901,
    EmailTaken = 40902,
    DeadlinePassed = 40903,
    AlreadyGraded = 40904,
    ClassArchived = 40905,

    // 429 限流
    TooManyRequests = 42900,

    // 500 服务器内部错误
    InternalServerError = 50000,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_groups_follow_http_status() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::GradeOutOfRange as i32 / 100, 400);
        assert_eq!(ErrorCode::AccountLocked as i32 / 100, 401);
        assert_eq!(ErrorCode::NotFoundOrDenied as i32 / 100, 404);
        assert_eq!(ErrorCode::AlreadyGraded as i32 / 100, 409);
        assert_eq!(ErrorCode::InternalServerError as i32 / 100, 500);
    }
}
