use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{CodelabError, Result};
use crate::models::ApiResponse;
use crate::models::blobs::{BlobDescriptor, UploadErrorBody};
use crate::models::courses::{requests::AddToCourseRequest, responses::AddMembersResponse};
use crate::models::feedback::{CodeFeedback, CodeFeedbackRequest};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};

/// 页面调用的后端接口
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn get_code_feedback(&self, question_id: i64, student_solution: &str)
    -> Result<CodeFeedback>;

    /// 上传程序文件，返回 blob 描述
    async fn upload_program(
        &self,
        filename: &str,
        content_type: &str,
        content: String,
    ) -> Result<BlobDescriptor>;

    /// 服务端没有返回记录时为 `None`
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Option<Submission>>;

    /// 请求送达但被服务端拒绝时为 `None`，只有网络错误才返回 `Err`
    async fn add_to_course(&self, req: AddToCourseRequest) -> Result<Option<AddMembersResponse>>;
}

/// 基于 reqwest 的实现
pub struct HttpCourseApi {
    client: Client,
    base_url: String,
}

impl HttpCourseApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 解析 `ApiResponse<T>`，非 2xx 时把服务端消息转为错误
async fn read_api_response<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned + ts_rs::TS,
{
    let status = response.status();
    let body: ApiResponse<T> = response.json().await?;
    if !status.is_success() {
        return Err(CodelabError::upstream(format!("{status}: {}", body.message)));
    }
    Ok(body.data)
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn get_code_feedback(
        &self,
        question_id: i64,
        student_solution: &str,
    ) -> Result<CodeFeedback> {
        let request = CodeFeedbackRequest {
            question_id,
            student_solution: student_solution.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/actions/code-feedback"))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn upload_program(
        &self,
        filename: &str,
        content_type: &str,
        content: String,
    ) -> Result<BlobDescriptor> {
        let response = self
            .client
            .post(self.url("/api/upload/program"))
            .query(&[("filename", filename)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<UploadErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(CodelabError::upstream(format!("upload failed: {message}")));
        }

        let descriptor: BlobDescriptor = response.json().await?;
        debug!("Uploaded {} to {}", filename, descriptor.url);
        Ok(descriptor)
    }

    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Option<Submission>> {
        let response = self
            .client
            .post(self.url("/api/actions/create-submission"))
            .json(&req)
            .send()
            .await?;
        read_api_response(response).await
    }

    async fn add_to_course(&self, req: AddToCourseRequest) -> Result<Option<AddMembersResponse>> {
        let response = self
            .client
            .post(self.url("/api/course-management/add-to-course"))
            .json(&req)
            .send()
            .await?;
        match read_api_response(response).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!("Adding members to course {} was rejected: {}", req.course_id, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_sends_filename_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/upload/program")
                    .query_param("filename", "3_8.py")
                    .header("content-type", "text/plain")
                    .body("print(42)");
                then.status(200).json_body(json!({
                    "url": "http://blobs/3_8-a.py",
                    "downloadUrl": "http://blobs/3_8-a.py?download=1",
                    "pathname": "3_8-a.py",
                    "contentType": "text/plain",
                    "contentDisposition": "attachment; filename=\"3_8.py\""
                }));
            })
            .await;

        let api = HttpCourseApi::new(server.base_url());
        let desc = api
            .upload_program("3_8.py", "text/plain", "print(42)".to_string())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(desc.url, "http://blobs/3_8-a.py");
    }

    #[tokio::test]
    async fn test_upload_error_message_surfaces() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/upload/program");
                then.status(400)
                    .json_body(json!({"error": "Expected file content in request body."}));
            })
            .await;

        let api = HttpCourseApi::new(server.base_url());
        let err = api
            .upload_program("1_1.py", "text/plain", String::new())
            .await
            .unwrap_err();
        assert!(err.message().contains("Expected file content in request body."));
    }

    #[tokio::test]
    async fn test_create_submission_reads_data() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/actions/create-submission")
                    .json_body(json!({
                        "userId": 3,
                        "questionId": 8,
                        "studentSolutionUrl": "http://blobs/3_8-a.py"
                    }));
                then.status(200).json_body(json!({
                    "code": 0,
                    "message": "ok",
                    "data": {
                        "id": 21,
                        "userId": 3,
                        "questionId": 8,
                        "studentSolutionUrl": "http://blobs/3_8-a.py",
                        "submittedAt": "2025-03-01T10:00:00Z"
                    },
                    "timestamp": "2025-03-01T10:00:00Z"
                }));
            })
            .await;

        let api = HttpCourseApi::new(server.base_url());
        let submission = api
            .create_submission(CreateSubmissionRequest {
                user_id: 3,
                question_id: 8,
                student_solution_url: "http://blobs/3_8-a.py".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.id, 21);
    }

    #[tokio::test]
    async fn test_rejected_invitation_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/course-management/add-to-course");
                then.status(403).json_body(json!({
                    "code": 1003,
                    "message": "Only course instructors can add members",
                    "timestamp": "2025-03-01T10:00:00Z"
                }));
            })
            .await;

        let api = HttpCourseApi::new(server.base_url());
        let result = api
            .add_to_course(AddToCourseRequest {
                requestor_email: "student@x.com".to_string(),
                course_id: 2,
                emails_to_add: vec!["a@x.com".to_string()],
            })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_api_error_becomes_err() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/actions/create-submission");
                then.status(404).json_body(json!({
                    "code": 4004,
                    "message": "Question not found",
                    "timestamp": "2025-03-01T10:00:00Z"
                }));
            })
            .await;

        let api = HttpCourseApi::new(server.base_url());
        let err = api
            .create_submission(CreateSubmissionRequest {
                user_id: 3,
                question_id: 999,
                student_solution_url: "http://blobs/x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.message().contains("Question not found"));
    }
}
