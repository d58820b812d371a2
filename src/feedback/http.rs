use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::FeedbackConfig;
use crate::errors::{CodelabError, Result};
use crate::feedback::FeedbackProvider;
use crate::models::feedback::CodeFeedback;
use crate::models::questions::entities::Question;

#[derive(Serialize)]
struct QuestionPayload<'a> {
    title: &'a str,
    description: &'a str,
    language: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackPayload<'a> {
    question: QuestionPayload<'a>,
    student_solution: &'a str,
}

/// 通过 HTTP 调用外部反馈服务
pub struct HttpFeedbackProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpFeedbackProvider {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodelabError::feedback_provider(format!("HTTP 客户端创建失败: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn from_config(config: &FeedbackConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Some(config.api_key.clone()),
            Duration::from_secs(config.timeout_secs.max(1)),
        )
    }
}

#[async_trait]
impl FeedbackProvider for HttpFeedbackProvider {
    async fn code_feedback(&self, question: &Question, solution: &str) -> Result<CodeFeedback> {
        let payload = FeedbackPayload {
            question: QuestionPayload {
                title: &question.title,
                description: &question.description,
                language: &question.language,
            },
            student_solution: solution,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Feedback service returned {} for question {}", status, question.id);
            return Err(CodelabError::upstream(format!(
                "feedback service responded with {status}"
            )));
        }

        let feedback: CodeFeedback = response.json().await?;
        debug!(
            "Received {} feedback items for question {}",
            feedback.feedback.len(),
            question.id
        );
        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::FeedbackSeverity;
    use httpmock::prelude::*;

    fn question() -> Question {
        let now = chrono::Utc::now();
        Question {
            id: 7,
            course_id: 1,
            title: "Two Sum".to_string(),
            description: "Return indices of two numbers adding to target.".to_string(),
            language: "py".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_posts_question_and_solution() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/feedback")
                    .header("authorization", "Bearer secret")
                    .json_body(serde_json::json!({
                        "question": {
                            "title": "Two Sum",
                            "description": "Return indices of two numbers adding to target.",
                            "language": "py"
                        },
                        "studentSolution": "def f(): pass"
                    }));
                then.status(200).json_body(serde_json::json!({
                    "feedback": [
                        {"line": 1, "severity": "warning", "message": "Function body is empty."}
                    ]
                }));
            })
            .await;

        let provider = HttpFeedbackProvider::new(
            server.url("/feedback"),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();

        let result = provider.code_feedback(&question(), "def f(): pass").await.unwrap();
        mock.assert_async().await;
        assert!(result.status.is_none());
        assert_eq!(result.feedback.len(), 1);
        assert_eq!(result.feedback[0].severity, FeedbackSeverity::Warning);
    }

    #[tokio::test]
    async fn test_upstream_status_passed_through() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/feedback");
                then.status(200)
                    .json_body(serde_json::json!({"status": "Solution is too long."}));
            })
            .await;

        let provider =
            HttpFeedbackProvider::new(server.url("/feedback"), None, Duration::from_secs(5)).unwrap();
        let result = provider.code_feedback(&question(), "x = 1").await.unwrap();
        assert_eq!(result.status.as_deref(), Some("Solution is too long."));
        assert!(result.feedback.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/feedback");
                then.status(503);
            })
            .await;

        let provider =
            HttpFeedbackProvider::new(server.url("/feedback"), None, Duration::from_secs(5)).unwrap();
        let err = provider.code_feedback(&question(), "x = 1").await.unwrap_err();
        assert!(matches!(err, CodelabError::Upstream(_)));
    }
}
