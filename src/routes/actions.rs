use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::feedback::CodeFeedbackRequest;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::{FeedbackService, SubmissionService};

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

static FEEDBACK_RATE_LIMIT: Lazy<RateLimit> = Lazy::new(RateLimit::code_feedback);

// 创建提交记录
pub async fn create_submission(
    request: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&request, body.into_inner())
        .await
}

// 获取代码反馈
pub async fn code_feedback(
    request: HttpRequest,
    body: web::Json<CodeFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .code_feedback(&request, body.into_inner())
        .await
}

// 供编辑器页面调用的服务端动作
pub fn configure_action_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/actions")
            .route("/create-submission", web::post().to(create_submission))
            .service(
                web::resource("/code-feedback")
                    .wrap(FEEDBACK_RATE_LIMIT.clone())
                    .route(web::post().to(code_feedback)),
            ),
    );
}
