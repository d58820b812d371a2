use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UploadService;
use crate::blob::guess_content_type;
use crate::errors::CodelabError;
use crate::models::blobs::{UploadErrorBody, UploadQuery};

pub async fn upload_program(
    service: &UploadService,
    request: &HttpRequest,
    query: UploadQuery,
    body: Bytes,
) -> ActixResult<HttpResponse> {
    // 先校验文件名，再校验内容
    let filename = match query.filename.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => {
            return Ok(HttpResponse::BadRequest()
                .json(UploadErrorBody::new(UploadErrorBody::MISSING_FILENAME)));
        }
    };

    if body.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(UploadErrorBody::new(UploadErrorBody::MISSING_CONTENT)));
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| guess_content_type(&filename).to_string());

    let store = service.get_blob_store(request);
    let size = body.len();

    match store.put(&filename, &content_type, body).await {
        Ok(descriptor) => {
            info!("Uploaded {} as {} ({} bytes)", filename, descriptor.pathname, size);
            Ok(HttpResponse::Ok().json(descriptor))
        }
        Err(e @ CodelabError::BlobTooLarge(_)) => {
            Ok(HttpResponse::PayloadTooLarge().json(UploadErrorBody::new(e.message())))
        }
        Err(e @ CodelabError::Validation(_)) => {
            Ok(HttpResponse::BadRequest().json(UploadErrorBody::new(e.message())))
        }
        Err(e) => {
            error!("Failed to store upload {}: {}", filename, e);
            Ok(HttpResponse::InternalServerError()
                .json(UploadErrorBody::new("Failed to store file.")))
        }
    }
}
