use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::FeedbackService;
use crate::models::feedback::{CodeFeedback, CodeFeedbackRequest};

pub const EMPTY_SOLUTION: &str = "Please write some code before running a check.";
pub const QUESTION_NOT_FOUND: &str = "Question not found.";
pub const FEEDBACK_UNAVAILABLE: &str = "Unable to generate feedback right now. Please try again later.";

/// 无法给出反馈时返回带 status 的结果，而不是 HTTP 错误
pub async fn code_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    req: CodeFeedbackRequest,
) -> ActixResult<HttpResponse> {
    if req.student_solution.trim().is_empty() {
        return Ok(HttpResponse::Ok().json(CodeFeedback::with_status(EMPTY_SOLUTION)));
    }

    let storage = service.get_storage(request);
    let question = match storage.get_question_by_id(req.question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(CodeFeedback::with_status(QUESTION_NOT_FOUND)));
        }
        Err(e) => {
            error!("Error loading question {}: {}", req.question_id, e);
            return Ok(HttpResponse::Ok().json(CodeFeedback::with_status(FEEDBACK_UNAVAILABLE)));
        }
    };

    let provider = service.get_provider(request);
    match provider.code_feedback(&question, &req.student_solution).await {
        Ok(feedback) => Ok(HttpResponse::Ok().json(feedback)),
        Err(e) => {
            warn!("Feedback provider failed for question {}: {}", question.id, e);
            Ok(HttpResponse::Ok().json(CodeFeedback::with_status(FEEDBACK_UNAVAILABLE)))
        }
    }
}
