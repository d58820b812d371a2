use serde::Deserialize;

use super::entities::UserRole;

// 创建用户请求（账号由外部认证系统同步，这里只用于初始化数据）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}
