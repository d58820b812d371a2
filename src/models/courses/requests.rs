use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建课程请求（初始化数据用）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

// 批量邀请成员请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AddToCourseRequest {
    pub requestor_email: String,
    pub course_id: i64,
    pub emails_to_add: Vec<String>,
}
