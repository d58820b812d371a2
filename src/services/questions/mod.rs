pub mod detail;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::QuestionDetailQuery;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 题目详情（附带课程和用户的提交记录）
    pub async fn get_question_detail(
        &self,
        request: &HttpRequest,
        question_id: i64,
        query: QuestionDetailQuery,
    ) -> ActixResult<HttpResponse> {
        detail::get_question_detail(self, request, question_id, query).await
    }
}
