//! Blob 存储
//!
//! 上传接口只做校验，真正的存储交给实现了 [`BlobStore`] 的后端。
//! 后端通过 `declare_blob_store_plugin!` 注册，启动时按配置名称选择。

pub mod local;
pub mod memory;
pub mod register;

use actix_web::web::Bytes;
use async_trait::async_trait;

use crate::errors::{CodelabError, Result};
use crate::models::blobs::BlobDescriptor;

/// 已存储的 blob
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: String,
    pub filename: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 保存内容并返回访问描述，同名文件不会互相覆盖
    async fn put(&self, filename: &str, content_type: &str, data: Bytes) -> Result<BlobDescriptor>;
    /// 按 pathname 读取
    async fn get(&self, pathname: &str) -> Result<Option<StoredBlob>>;
}

/// 后端共用的设置
#[derive(Debug, Clone)]
pub struct BlobSettings {
    pub public_base_url: String,
    pub max_size: usize,
}

impl BlobSettings {
    pub fn from_config() -> Self {
        let config = crate::config::AppConfig::get();
        Self {
            public_base_url: config.blob.public_base_url.clone(),
            max_size: config.blob.max_size,
        }
    }

    /// 上传接口的请求体上限，与 blob 大小限制保持一致
    pub fn payload_limit(&self) -> usize {
        if self.max_size == 0 {
            usize::MAX
        } else {
            self.max_size
        }
    }

    /// 大小限制检查，0 表示不限制
    pub fn check_size(&self, len: usize) -> Result<()> {
        if self.max_size > 0 && len > self.max_size {
            return Err(CodelabError::blob_too_large(format!(
                "{len} bytes exceeds the {} byte limit",
                self.max_size
            )));
        }
        Ok(())
    }

    pub fn describe(&self, pathname: &str, filename: &str, content_type: &str) -> BlobDescriptor {
        let url = format!(
            "{}/api/blobs/{}",
            self.public_base_url.trim_end_matches('/'),
            pathname
        );
        BlobDescriptor {
            download_url: format!("{url}?download=1"),
            url,
            pathname: pathname.to_string(),
            content_type: content_type.to_string(),
            content_disposition: format!("attachment; filename=\"{filename}\""),
        }
    }
}

/// 只保留文件名的最后一段，并替换掉不安全的字符
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(CodelabError::validation(format!(
            "Invalid blob filename: {filename:?}"
        )));
    }
    Ok(cleaned)
}

/// 生成不会冲突的存储路径：`{stem}-{suffix}.{ext}`
pub fn unique_pathname(filename: &str) -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..16].to_string();
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{suffix}.{ext}"),
        _ => format!("{filename}-{suffix}"),
    }
}

/// pathname 必须是上传时生成的单段名称
pub fn is_valid_pathname(pathname: &str) -> bool {
    matches!(sanitize_filename(pathname), Ok(clean) if clean == pathname)
}

/// 根据扩展名推断内容类型
pub fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => "application/json",
        "html" | "htm" => "text/html; charset=utf-8",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "zip" => "application/zip",
        // 源代码与纯文本
        "txt" | "md" | "py" | "js" | "ts" | "java" | "c" | "h" | "cpp" | "hpp" | "cs" | "go"
        | "rs" | "rb" | "php" | "kt" | "swift" | "sql" | "sh" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
