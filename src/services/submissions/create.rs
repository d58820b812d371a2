use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    mut req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    req.student_solution_url = req.student_solution_url.trim().to_string();
    if req.student_solution_url.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "studentSolutionUrl must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            error!("Error loading user {}: {}", req.user_id, e);
            return Ok(create_failed());
        }
    }

    match storage.get_question_by_id(req.question_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            error!("Error loading question {}: {}", req.question_id, e);
            return Ok(create_failed());
        }
    }

    match storage.create_submission(req).await {
        Ok(submission) => {
            info!(
                "Submission {} created for user {} on question {}",
                submission.id, submission.user_id, submission.question_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        Err(e) => {
            error!("Error creating submission: {}", e);
            Ok(create_failed())
        }
    }
}

fn create_failed() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::SubmissionCreateFailed,
        "Unable to create new submission",
    ))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::json;

    use crate::models::ApiResponse;
    use crate::models::submissions::entities::Submission;
    use crate::routes;
    use crate::services::testing::fixture;

    #[actix_web::test]
    async fn test_create_then_fetch() {
        let fx = fixture().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fx.storage.clone()))
                .configure(routes::configure_action_routes)
                .configure(routes::configure_submission_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/actions/create-submission")
            .set_json(json!({
                "userId": fx.student.id,
                "questionId": fx.question.id,
                "studentSolutionUrl": "http://localhost:8080/api/blobs/2_1-abc.py"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let created: ApiResponse<Submission> = test::read_body_json(resp).await;
        let created = created.data.unwrap();
        assert_eq!(created.question_id, fx.question.id);

        let req = test::TestRequest::get()
            .uri(&format!("/api/submissions/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let fetched: ApiResponse<Submission> = test::read_body_json(resp).await;
        assert_eq!(fetched.data.unwrap(), created);
    }

    #[actix_web::test]
    async fn test_rejects_unknown_refs_and_empty_url() {
        let fx = fixture().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fx.storage.clone()))
                .configure(routes::configure_action_routes),
        )
        .await;

        let cases = [
            (fx.student.id, fx.question.id, "   ", 400),
            (9999, fx.question.id, "http://x/blob", 404),
            (fx.student.id, 9999, "http://x/blob", 404),
        ];
        for (user_id, question_id, url, status) in cases {
            let req = test::TestRequest::post()
                .uri("/api/actions/create-submission")
                .set_json(json!({
                    "userId": user_id,
                    "questionId": question_id,
                    "studentSolutionUrl": url
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{user_id}/{question_id}/{url:?}");
        }
    }
}
