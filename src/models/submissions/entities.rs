use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    // 学生代码在 blob 存储中的访问地址
    pub student_solution_url: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
