use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UploadService;
use crate::models::blobs::DownloadQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn download_blob(
    service: &UploadService,
    request: &HttpRequest,
    pathname: String,
    query: DownloadQuery,
) -> ActixResult<HttpResponse> {
    let store = service.get_blob_store(request);

    let blob = match store.get(&pathname).await {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BlobNotFound,
                "Blob not found",
            )));
        }
        Err(e) => {
            error!("Failed to read blob {}: {}", pathname, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to read blob",
                )),
            );
        }
    };

    let disposition = if query.download.is_some() {
        format!("attachment; filename=\"{}\"", blob.filename)
    } else {
        format!("inline; filename=\"{}\"", blob.filename)
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, blob.content_type))
        .insert_header((CONTENT_DISPOSITION, disposition))
        .body(blob.data))
}
