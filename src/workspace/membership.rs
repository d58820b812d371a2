use tracing::error;

use super::api::CourseApi;
use crate::models::courses::{requests::AddToCourseRequest, responses::AddMembersResponse};

/// 邀请对话框提交后的状态
#[derive(Debug, Clone, PartialEq)]
pub enum InviteOutcome {
    /// 请求已送达，对话框关闭并刷新页面；服务端拒绝时没有结果
    Closed(Option<AddMembersResponse>),
    /// 输入为空或请求未送达，对话框保持打开
    KeepOpen,
}

/// 按逗号拆分输入框内容，其余校验交给服务端
pub fn split_emails(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

/// 把输入框中的邮箱提交到课程成员接口
pub async fn invite_members(
    api: &dyn CourseApi,
    requestor_email: &str,
    course_id: i64,
    input: &str,
) -> InviteOutcome {
    if input.trim().is_empty() {
        return InviteOutcome::KeepOpen;
    }

    let request = AddToCourseRequest {
        requestor_email: requestor_email.to_string(),
        course_id,
        emails_to_add: split_emails(input),
    };

    match api.add_to_course(request).await {
        Ok(result) => InviteOutcome::Closed(result),
        Err(e) => {
            error!("Failed to send member invitation for course {}: {}", course_id, e);
            InviteOutcome::KeepOpen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CodelabError, Result};
    use crate::models::blobs::BlobDescriptor;
    use crate::models::feedback::CodeFeedback;
    use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        offline: bool,
        sent: Mutex<Vec<AddToCourseRequest>>,
    }

    #[async_trait]
    impl CourseApi for FakeApi {
        async fn get_code_feedback(&self, _question_id: i64, _solution: &str) -> Result<CodeFeedback> {
            unimplemented!()
        }

        async fn upload_program(&self, _f: &str, _c: &str, _content: String) -> Result<BlobDescriptor> {
            unimplemented!()
        }

        async fn create_submission(&self, _req: CreateSubmissionRequest) -> Result<Option<Submission>> {
            unimplemented!()
        }

        async fn add_to_course(&self, req: AddToCourseRequest) -> Result<Option<AddMembersResponse>> {
            if self.offline {
                return Err(CodelabError::upstream("connection refused"));
            }
            let result = AddMembersResponse {
                added: req.emails_to_add.clone(),
                ..Default::default()
            };
            self.sent.lock().unwrap().push(req);
            Ok(Some(result))
        }
    }

    #[test]
    fn test_split_emails_keeps_raw_entries() {
        assert_eq!(
            split_emails("a@x.com,b@x.com, c@x.com"),
            vec!["a@x.com", "b@x.com", " c@x.com"]
        );
        assert_eq!(split_emails("solo@x.com"), vec!["solo@x.com"]);
    }

    #[tokio::test]
    async fn test_invite_posts_and_closes() {
        let api = FakeApi::default();
        let outcome = invite_members(&api, "instructor@x.com", 4, "a@x.com,b@x.com").await;

        let sent = api.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].requestor_email, "instructor@x.com");
        assert_eq!(sent[0].course_id, 4);
        assert_eq!(sent[0].emails_to_add, vec!["a@x.com", "b@x.com"]);
        assert!(matches!(outcome, InviteOutcome::Closed(Some(r)) if r.added.len() == 2));
    }

    #[tokio::test]
    async fn test_empty_input_or_transport_error_keeps_dialog_open() {
        let api = FakeApi::default();
        assert_eq!(invite_members(&api, "i@x.com", 4, "  ").await, InviteOutcome::KeepOpen);
        assert!(api.sent.lock().unwrap().is_empty());

        let offline = FakeApi {
            offline: true,
            ..Default::default()
        };
        assert_eq!(
            invite_members(&offline, "i@x.com", 4, "a@x.com").await,
            InviteOutcome::KeepOpen
        );
    }
}
