use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Blob 存储返回的访问描述，上传接口原样返回给调用方
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/blob.ts")]
pub struct BlobDescriptor {
    pub url: String,
    pub download_url: String,
    pub pathname: String,
    pub content_type: String,
    pub content_disposition: String,
}

/// 上传接口的查询参数
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

/// 下载接口的查询参数
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub download: Option<String>,
}

/// 上传接口的错误体：`{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/blob.ts")]
pub struct UploadErrorBody {
    pub error: String,
}

impl UploadErrorBody {
    pub const MISSING_FILENAME: &'static str = "Expected filename in url.";
    pub const MISSING_CONTENT: &'static str = "Expected file content in request body.";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
