//! 代码反馈协作方
//!
//! 反馈模型本身不在本服务内，这里只定义调用接口和一个 HTTP 实现。

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::{CodelabError, Result};
use crate::models::feedback::CodeFeedback;
use crate::models::questions::entities::Question;

pub use http::HttpFeedbackProvider;

#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// 为学生代码生成反馈，协作方可以在结果里带 status 表示无法给出反馈
    async fn code_feedback(&self, question: &Question, solution: &str) -> Result<CodeFeedback>;
}

/// 未配置反馈服务时使用，所有调用都返回错误
pub struct UnconfiguredFeedbackProvider;

#[async_trait]
impl FeedbackProvider for UnconfiguredFeedbackProvider {
    async fn code_feedback(&self, _question: &Question, _solution: &str) -> Result<CodeFeedback> {
        Err(CodelabError::feedback_provider(
            "feedback.endpoint 未配置",
        ))
    }
}

/// 根据配置创建反馈协作方
pub fn create_feedback_provider() -> Result<Arc<dyn FeedbackProvider>> {
    let config = &AppConfig::get().feedback;
    if config.endpoint.trim().is_empty() {
        warn!("Feedback endpoint not configured, code feedback will be unavailable");
        return Ok(Arc::new(UnconfiguredFeedbackProvider));
    }
    Ok(Arc::new(HttpFeedbackProvider::from_config(config)?))
}
