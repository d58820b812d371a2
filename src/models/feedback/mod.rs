use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 反馈严重程度，对应编辑器中的装饰样式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub enum FeedbackSeverity {
    Info,
    Warning,
    Error,
}

/// 单条代码反馈，行号从 1 开始
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackItem {
    pub line: u32,
    pub severity: FeedbackSeverity,
    pub message: String,
}

/// getCodeFeedback 的结果：`status` 存在时表示无法给出反馈，`feedback` 为空
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CodeFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub feedback: Vec<FeedbackItem>,
}

impl CodeFeedback {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            feedback: Vec::new(),
        }
    }

    pub fn with_items(feedback: Vec<FeedbackItem>) -> Self {
        Self {
            status: None,
            feedback,
        }
    }
}

// 请求代码反馈
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CodeFeedbackRequest {
    pub question_id: i64,
    pub student_solution: String,
}
