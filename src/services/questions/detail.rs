use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuestionService;
use crate::models::questions::requests::QuestionDetailQuery;
use crate::models::questions::responses::QuestionDetail;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_question_detail(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    query: QuestionDetailQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let question = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            error!("Error loading question {}: {}", question_id, e);
            return Ok(internal_error());
        }
    };

    let course = match storage.get_course_by_id(question.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Error loading course {}: {}", question.course_id, e);
            return Ok(internal_error());
        }
    };

    let submissions = match query.user_id {
        Some(user_id) => match storage.list_user_submissions(question.id, user_id).await {
            Ok(list) => list,
            Err(e) => {
                error!("Error listing submissions for user {}: {}", user_id, e);
                return Ok(internal_error());
            }
        },
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuestionDetail {
            question,
            course,
            submissions,
        },
        "Question retrieved successfully",
    )))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Failed to load question",
    ))
}
