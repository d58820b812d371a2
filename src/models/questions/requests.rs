use serde::Deserialize;
use ts_rs::TS;

// 创建题目请求（初始化数据用）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub language: String,
}

// 题目详情查询参数
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionDetailQuery {
    /// 需要附带提交记录的用户
    pub user_id: Option<i64>,
}
