//! 数据模型定义
//!
//! 各业务域按 entities / requests / responses 拆分，
//! 所有对外的结构同时导出 TypeScript 类型供前端编辑器使用。

pub mod blobs;
pub mod common;
pub mod courses;
pub mod feedback;
pub mod questions;
pub mod submissions;
pub mod users;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
