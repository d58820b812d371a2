pub mod download;
pub mod program;

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blob::BlobStore;
use crate::models::blobs::{DownloadQuery, UploadQuery};

pub struct UploadService {
    blob_store: Option<Arc<dyn BlobStore>>,
}

impl UploadService {
    pub fn new_lazy() -> Self {
        Self { blob_store: None }
    }

    pub(crate) fn get_blob_store(&self, request: &HttpRequest) -> Arc<dyn BlobStore> {
        if let Some(store) = &self.blob_store {
            store.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn BlobStore>>>()
                .expect("BlobStore not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传学生程序
    pub async fn upload_program(
        &self,
        request: &HttpRequest,
        query: UploadQuery,
        body: Bytes,
    ) -> ActixResult<HttpResponse> {
        program::upload_program(self, request, query, body).await
    }

    // 读取已上传的 blob
    pub async fn download_blob(
        &self,
        request: &HttpRequest,
        pathname: String,
        query: DownloadQuery,
    ) -> ActixResult<HttpResponse> {
        download::download_blob(self, request, pathname, query).await
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use std::sync::Arc;

    use crate::blob::memory::MemoryBlobStore;
    use crate::blob::{BlobSettings, BlobStore};
    use crate::models::blobs::{BlobDescriptor, UploadErrorBody};
    use crate::routes;

    fn memory_store() -> Arc<dyn BlobStore> {
        store_with_limit(16)
    }

    fn store_with_limit(max_size: usize) -> Arc<dyn BlobStore> {
        Arc::new(MemoryBlobStore::new(BlobSettings {
            public_base_url: "http://codelab.test".to_string(),
            max_size,
        }))
    }

    macro_rules! upload_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store))
                    .configure(routes::configure_upload_routes)
                    .configure(routes::configure_blob_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_filename_is_rejected() {
        let app = upload_app!(memory_store());

        // 文件名和内容都缺失时先报告文件名
        for uri in ["/api/upload/program", "/api/upload/program?filename="] {
            let req = test::TestRequest::post().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
            let body: UploadErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.error, "Expected filename in url.");
        }
    }

    #[actix_web::test]
    async fn test_empty_body_is_rejected() {
        let app = upload_app!(memory_store());

        let req = test::TestRequest::post()
            .uri("/api/upload/program?filename=test.txt")
            .set_payload("")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: UploadErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Expected file content in request body.");
    }

    #[actix_web::test]
    async fn test_upload_returns_descriptor_and_serves_blob() {
        let store = memory_store();
        let app = upload_app!(store.clone());

        let req = test::TestRequest::post()
            .uri("/api/upload/program?filename=4_2.py")
            .insert_header(("content-type", "text/plain"))
            .set_payload("print('hi')")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let desc: BlobDescriptor = test::read_body_json(resp).await;
        assert!(desc.pathname.starts_with("4_2-"));
        assert_eq!(desc.content_type, "text/plain");
        assert_eq!(
            desc.url,
            format!("http://codelab.test/api/blobs/{}", desc.pathname)
        );
        assert!(store.get(&desc.pathname).await.unwrap().is_some());

        let req = test::TestRequest::get()
            .uri(&format!("/api/blobs/{}?download=1", desc.pathname))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"4_2.py\""
        );
        assert_eq!(test::read_body(resp).await, "print('hi')");
    }

    #[actix_web::test]
    async fn test_blob_client_limit_maps_to_413() {
        let app = upload_app!(memory_store());

        let req = test::TestRequest::post()
            .uri("/api/upload/program?filename=big.py")
            .set_payload("x".repeat(17))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 413);
    }

    #[actix_web::test]
    async fn test_global_payload_limit_does_not_apply_to_programs() {
        let app = test::init_service(
            App::new()
                .app_data(web::PayloadConfig::new(1_048_576))
                .app_data(web::Data::new(store_with_limit(0)))
                .configure(routes::configure_upload_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/upload/program?filename=big.py")
            .set_payload("x".repeat(2 * 1_048_576))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let desc: BlobDescriptor = test::read_body_json(resp).await;
        assert!(desc.pathname.starts_with("big-"));
    }

    #[actix_web::test]
    async fn test_unknown_blob_is_404() {
        let app = upload_app!(memory_store());

        let req = test::TestRequest::get()
            .uri("/api/blobs/missing-0000.py")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
