pub mod code_feedback;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::feedback::FeedbackProvider;
use crate::models::feedback::CodeFeedbackRequest;
use crate::storage::Storage;

/// 题目查询走数据库，反馈生成交给外部协作方
pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
    provider: Option<Arc<dyn FeedbackProvider>>,
}

impl FeedbackService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            provider: None,
        }
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

    pub(crate) fn get_provider(&self, request: &HttpRequest) -> Arc<dyn FeedbackProvider> {
        if let Some(provider) = &self.provider {
            provider.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn FeedbackProvider>>>()
                .expect("FeedbackProvider not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn code_feedback(
        &self,
        request: &HttpRequest,
        req: CodeFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        code_feedback::code_feedback(self, request, req).await
    }
}
