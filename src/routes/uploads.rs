use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::blob::BlobSettings;
use crate::middlewares::RateLimit;
use crate::models::blobs::UploadQuery;
use crate::services::UploadService;

// 懒加载的全局 UploadService 实例
static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

// 所有 worker 共用同一份计数
static UPLOAD_RATE_LIMIT: Lazy<RateLimit> = Lazy::new(RateLimit::program_upload);

// 上传学生程序，请求体即文件内容
pub async fn upload_program(
    request: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .upload_program(&request, query.into_inner(), body)
        .await
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/upload")
            .wrap(UPLOAD_RATE_LIMIT.clone())
            .service(
                web::resource("/program")
                    // 程序文件只受 blob 大小限制，不受全局请求体上限约束
                    .app_data(web::PayloadConfig::new(
                        BlobSettings::from_config().payload_limit(),
                    ))
                    .route(web::post().to(upload_program)),
            ),
    );
}
