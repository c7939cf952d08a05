use super::entities::UserRole;

// 用户创建参数（服务层构造，password_hash 已完成散列）
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}
