use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::blobs::DownloadQuery;
use crate::services::UploadService;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn download_blob(
    request: HttpRequest,
    pathname: web::Path<String>,
    query: web::Query<DownloadQuery>,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .download_blob(&request, pathname.into_inner(), query.into_inner())
        .await
}

pub fn configure_blob_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/blobs").route("/{pathname}", web::get().to(download_blob)));
}
