use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 批量邀请结果，每个邮箱只会出现在其中一个列表里
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AddMembersResponse {
    pub added: Vec<String>,
    pub already_members: Vec<String>,
    pub not_found: Vec<String>,
    pub invalid: Vec<String>,
}
