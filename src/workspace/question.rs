use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{error, warn};

use super::api::CourseApi;
use super::notice::{Navigator, Notice, Notifier};
use crate::errors::{CodelabError, Result};
use crate::models::courses::entities::Course;
use crate::models::feedback::FeedbackItem;
use crate::models::questions::entities::Question;
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};

pub const SUBMISSION_CONTENT_TYPE: &str = "text/plain";

/// 一次按钮操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 同一按钮的上一次操作还没结束
    Ignored,
    Succeeded,
    Failed,
}

/// 按钮的加载标志，离开作用域时清除
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
struct EditorState {
    content: String,
    feedback: Vec<FeedbackItem>,
    should_apply_decorations: bool,
}

/// 题目页面：编辑器内容、反馈列表和两个按钮的状态
pub struct QuestionWorkspace {
    api: Arc<dyn CourseApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    user_id: i64,
    question: Question,
    course: Course,
    editor: Mutex<EditorState>,
    checking: AtomicBool,
    submitting: AtomicBool,
}

impl QuestionWorkspace {
    pub fn new(
        api: Arc<dyn CourseApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        user_id: i64,
        question: Question,
        course: Course,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            user_id,
            question,
            course,
            editor: Mutex::new(EditorState::default()),
            checking: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_checking(&self) -> bool {
        self.checking.load(Ordering::Acquire)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn content(&self) -> String {
        self.editor.lock().await.content.clone()
    }

    pub async fn feedback(&self) -> Vec<FeedbackItem> {
        self.editor.lock().await.feedback.clone()
    }

    pub async fn should_apply_decorations(&self) -> bool {
        self.editor.lock().await.should_apply_decorations
    }

    /// 编辑器内容变化，旧的反馈装饰不再对应当前代码
    pub async fn on_editor_change(&self, value: Option<&str>) {
        let mut editor = self.editor.lock().await;
        editor.content = value.unwrap_or_default().to_string();
        editor.should_apply_decorations = false;
    }

    /// 提交文件名：`{userId}_{questionId}.{language}`
    pub fn submission_filename(&self) -> String {
        format!("{}_{}.{}", self.user_id, self.question.id, self.question.language)
    }

    /// "Run Check" 按钮
    pub async fn request_feedback(&self) -> ActionOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.checking) else {
            return ActionOutcome::Ignored;
        };

        let content = self.content().await;
        match self.api.get_code_feedback(self.question.id, &content).await {
            // 空字符串的 status 视为没有状态
            Ok(result) => match result.status.filter(|status| !status.is_empty()) {
                Some(status) => {
                    self.notifier.notify(Notice::destructive(status, None));
                    ActionOutcome::Failed
                }
                None => {
                    let mut editor = self.editor.lock().await;
                    editor.feedback = result.feedback;
                    editor.should_apply_decorations = true;
                    ActionOutcome::Succeeded
                }
            },
            Err(e) => {
                warn!("Code feedback request failed: {}", e);
                self.notifier.notify(Notice::destructive(
                    "Unable to check your code",
                    Some("Please try again later.".to_string()),
                ));
                ActionOutcome::Failed
            }
        }
    }

    /// "Submit Code" 按钮：上传文件后创建提交记录，成功后跳转到提交页
    pub async fn submit(&self) -> ActionOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.submitting) else {
            return ActionOutcome::Ignored;
        };

        match self.upload_and_record().await {
            Ok(submission) => {
                self.notifier.notify(Notice::success(
                    "Submission Successful",
                    "Redirecting back to your course.",
                ));
                self.navigator.navigate(&format!(
                    "/courses/{}/{}/{}",
                    self.course.code, self.question.id, submission.id
                ));
                ActionOutcome::Succeeded
            }
            Err(e) => {
                // 已上传的文件不做清理
                error!("Submission failed: {}", e);
                self.notifier.notify(Notice::destructive(
                    "Submission Failed",
                    Some("Please save your work and try again later.".to_string()),
                ));
                ActionOutcome::Failed
            }
        }
    }

    async fn upload_and_record(&self) -> Result<Submission> {
        let content = self.content().await;
        let blob = self
            .api
            .upload_program(&self.submission_filename(), SUBMISSION_CONTENT_TYPE, content)
            .await?;

        self.api
            .create_submission(CreateSubmissionRequest {
                user_id: self.user_id,
                question_id: self.question.id,
                student_solution_url: blob.url,
            })
            .await?
            .ok_or_else(|| CodelabError::not_found("Unable to create new submission"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blobs::BlobDescriptor;
    use crate::models::courses::{requests::AddToCourseRequest, responses::AddMembersResponse};
    use crate::models::feedback::{CodeFeedback, FeedbackSeverity};
    use crate::workspace::notice::NoticeVariant;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct Recorder {
        notices: StdMutex<Vec<Notice>>,
        paths: StdMutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, path: &str) {
            self.paths.lock().unwrap().push(path.to_string());
        }
    }

    #[derive(Default)]
    struct FakeApi {
        feedback: Option<CodeFeedback>,
        upload_fails: bool,
        no_record: bool,
        uploads: StdMutex<Vec<(String, String, String)>>,
        created: StdMutex<Vec<CreateSubmissionRequest>>,
        // 设置后反馈请求会等待放行
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl CourseApi for FakeApi {
        async fn get_code_feedback(&self, _question_id: i64, _solution: &str) -> Result<CodeFeedback> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.feedback
                .clone()
                .ok_or_else(|| CodelabError::upstream("connection refused"))
        }

        async fn upload_program(
            &self,
            filename: &str,
            content_type: &str,
            content: String,
        ) -> Result<BlobDescriptor> {
            if self.upload_fails {
                return Err(CodelabError::upstream("upload failed"));
            }
            self.uploads.lock().unwrap().push((
                filename.to_string(),
                content_type.to_string(),
                content,
            ));
            Ok(BlobDescriptor {
                url: format!("http://blobs/{filename}"),
                download_url: format!("http://blobs/{filename}?download=1"),
                pathname: filename.to_string(),
                content_type: content_type.to_string(),
                content_disposition: format!("attachment; filename=\"{filename}\""),
            })
        }

        async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Option<Submission>> {
            self.created.lock().unwrap().push(req.clone());
            if self.no_record {
                return Ok(None);
            }
            Ok(Some(Submission {
                id: 55,
                user_id: req.user_id,
                question_id: req.question_id,
                student_solution_url: req.student_solution_url,
                submitted_at: chrono::Utc::now(),
            }))
        }

        async fn add_to_course(&self, _req: AddToCourseRequest) -> Result<Option<AddMembersResponse>> {
            Ok(None)
        }
    }

    fn workspace(api: FakeApi) -> (Arc<QuestionWorkspace>, Arc<FakeApi>, Arc<Recorder>) {
        let now = chrono::Utc::now();
        let api = Arc::new(api);
        let recorder = Arc::new(Recorder::default());
        let question = Question {
            id: 8,
            course_id: 2,
            title: "Reverse a list".to_string(),
            description: "Return the list reversed.".to_string(),
            language: "py".to_string(),
            created_at: now,
            updated_at: now,
        };
        let course = Course {
            id: 2,
            code: "COMP1511".to_string(),
            name: "Programming Fundamentals".to_string(),
            description: None,
            owner_id: 1,
            created_at: now,
            updated_at: now,
        };
        let ws = QuestionWorkspace::new(
            api.clone(),
            recorder.clone(),
            recorder.clone(),
            3,
            question,
            course,
        );
        (Arc::new(ws), api, recorder)
    }

    #[tokio::test]
    async fn test_feedback_status_shows_notice_only() {
        let (ws, _api, recorder) = workspace(FakeApi {
            feedback: Some(CodeFeedback::with_status("Please write some code before running a check.")),
            ..Default::default()
        });

        assert_eq!(ws.request_feedback().await, ActionOutcome::Failed);

        let notices = recorder.notices.lock().unwrap().clone();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Please write some code before running a check.");
        assert_eq!(notices[0].variant, NoticeVariant::Destructive);
        assert!(ws.feedback().await.is_empty());
        assert!(!ws.should_apply_decorations().await);
        assert!(!ws.is_checking());
    }

    #[tokio::test]
    async fn test_feedback_items_enable_decorations() {
        let items = vec![FeedbackItem {
            line: 1,
            severity: FeedbackSeverity::Info,
            message: "Consider slicing with [::-1].".to_string(),
        }];
        let (ws, _api, recorder) = workspace(FakeApi {
            feedback: Some(CodeFeedback::with_items(items.clone())),
            ..Default::default()
        });

        ws.on_editor_change(Some("def rev(xs): return list(reversed(xs))"))
            .await;
        assert_eq!(ws.request_feedback().await, ActionOutcome::Succeeded);
        assert_eq!(ws.feedback().await, items);
        assert!(ws.should_apply_decorations().await);
        assert!(recorder.notices.lock().unwrap().is_empty());

        // 继续编辑后装饰失效，反馈列表保留
        ws.on_editor_change(None).await;
        assert_eq!(ws.content().await, "");
        assert!(!ws.should_apply_decorations().await);
        assert_eq!(ws.feedback().await, items);
    }

    #[tokio::test]
    async fn test_empty_status_applies_feedback() {
        let items = vec![FeedbackItem {
            line: 3,
            severity: FeedbackSeverity::Info,
            message: "Loop bound is off by one.".to_string(),
        }];
        let (ws, _api, recorder) = workspace(FakeApi {
            feedback: Some(CodeFeedback {
                status: Some(String::new()),
                feedback: items.clone(),
            }),
            ..Default::default()
        });

        assert_eq!(ws.request_feedback().await, ActionOutcome::Succeeded);
        assert_eq!(ws.feedback().await, items);
        assert!(ws.should_apply_decorations().await);
        assert!(recorder.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_transport_error_clears_flag() {
        let (ws, _api, recorder) = workspace(FakeApi::default());
        assert_eq!(ws.request_feedback().await, ActionOutcome::Failed);
        assert!(!ws.is_checking());
        assert_eq!(recorder.notices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_uploads_then_navigates() {
        let (ws, api, recorder) = workspace(FakeApi::default());
        ws.on_editor_change(Some("print(list(reversed([1, 2])))")).await;

        assert_eq!(ws.submit().await, ActionOutcome::Succeeded);

        let uploads = api.uploads.lock().unwrap().clone();
        assert_eq!(
            uploads,
            vec![(
                "3_8.py".to_string(),
                "text/plain".to_string(),
                "print(list(reversed([1, 2])))".to_string()
            )]
        );
        let created = api.created.lock().unwrap().clone();
        assert_eq!(created[0].student_solution_url, "http://blobs/3_8.py");

        let notices = recorder.notices.lock().unwrap().clone();
        assert_eq!(notices[0].title, "Submission Successful");
        assert_eq!(
            notices[0].description.as_deref(),
            Some("Redirecting back to your course.")
        );
        assert_eq!(
            recorder.paths.lock().unwrap().clone(),
            vec!["/courses/COMP1511/8/55".to_string()]
        );
        assert!(!ws.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_failures_show_generic_notice() {
        for api in [
            FakeApi {
                upload_fails: true,
                ..Default::default()
            },
            FakeApi {
                no_record: true,
                ..Default::default()
            },
        ] {
            let (ws, _api, recorder) = workspace(api);
            assert_eq!(ws.submit().await, ActionOutcome::Failed);

            let notices = recorder.notices.lock().unwrap().clone();
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].title, "Submission Failed");
            assert_eq!(
                notices[0].description.as_deref(),
                Some("Please save your work and try again later.")
            );
            assert!(recorder.paths.lock().unwrap().is_empty());
            assert!(!ws.is_submitting());
        }
    }

    #[tokio::test]
    async fn test_duplicate_clicks_ignored_but_controls_independent() {
        let gate = Arc::new(Notify::new());
        let (ws, _api, _recorder) = workspace(FakeApi {
            feedback: Some(CodeFeedback::default()),
            gate: Some(gate.clone()),
            ..Default::default()
        });

        let first = tokio::spawn({
            let ws = ws.clone();
            async move { ws.request_feedback().await }
        });
        while !ws.is_checking() {
            tokio::task::yield_now().await;
        }

        // 同一按钮再次点击被忽略，提交不受影响
        assert_eq!(ws.request_feedback().await, ActionOutcome::Ignored);
        assert_eq!(ws.submit().await, ActionOutcome::Succeeded);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), ActionOutcome::Succeeded);
        assert!(!ws.is_checking());
    }
}
