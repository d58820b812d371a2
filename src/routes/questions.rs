use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::questions::requests::QuestionDetailQuery;
use crate::services::QuestionService;
use crate::utils::SafeQuestionIdI64;

static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn get_question_detail(
    request: HttpRequest,
    question_id: SafeQuestionIdI64,
    query: web::Query<QuestionDetailQuery>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .get_question_detail(&request, question_id.0, query.into_inner())
        .await
}

pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/questions").route("/{question_id}", web::get().to(get_question_detail)),
    );
}
