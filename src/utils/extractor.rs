//! 路径参数提取器
//!
//! 路径中的 id 解析失败或不为正数时直接返回 400，handler 里不必再校验。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    match req.match_info().get(param).and_then(|raw| raw.parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter: {param}"),
            ));
            Err(InternalError::from_response(format!("invalid {param}"), response).into())
        }
    }
}

define_safe_i64_extractor!(SafeQuestionIdI64, "question_id");
define_safe_i64_extractor!(SafeSubmissionIdI64, "submission_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn show(id: SafeQuestionIdI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_positive_id_passes() {
        let app =
            test::init_service(App::new().route("/q/{question_id}", web::get().to(show))).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/q/42").to_request()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(test::read_body(resp).await, "42");
    }

    #[actix_web::test]
    async fn test_invalid_id_rejected() {
        let app =
            test::init_service(App::new().route("/q/{question_id}", web::get().to(show))).await;
        for uri in ["/q/0", "/q/-3", "/q/abc"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), 400, "{uri}");
        }
    }
}
