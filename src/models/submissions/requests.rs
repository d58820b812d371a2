use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建提交请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub user_id: i64,
    pub question_id: i64,
    pub student_solution_url: String,
}
