use std::path::{Path, PathBuf};

use actix_web::web::Bytes;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::blob::{
    BlobSettings, BlobStore, StoredBlob, is_valid_pathname, sanitize_filename, unique_pathname,
};
use crate::config::AppConfig;
use crate::declare_blob_store_plugin;
use crate::errors::{CodelabError, Result};
use crate::models::blobs::BlobDescriptor;

declare_blob_store_plugin!("local", LocalBlobStore);

/// 与 blob 文件同目录的元数据
#[derive(Debug, Serialize, Deserialize)]
struct BlobMeta {
    content_type: String,
    filename: String,
}

/// 本地文件系统存储，内容类型写在 `.meta` 旁文件里
pub struct LocalBlobStore {
    dir: PathBuf,
    settings: BlobSettings,
}

impl LocalBlobStore {
    pub fn new(dir: impl Into<PathBuf>, settings: BlobSettings) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            CodelabError::blob_store(format!("无法创建 blob 目录 {}: {e}", dir.display()))
        })?;
        debug!("LocalBlobStore initialized at {}", dir.display());
        Ok(Self { dir, settings })
    }

    pub fn from_config() -> Result<Self> {
        let config = AppConfig::get();
        Self::new(&config.blob.dir, BlobSettings::from_config())
    }

    fn meta_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".meta");
        PathBuf::from(name)
    }

    /// 先写数据再写旁文件，旁文件失败时删除数据文件
    async fn write_blob(path: &Path, data: &[u8], meta: &BlobMeta) -> Result<()> {
        let raw_meta = serde_json::to_vec(meta)?;
        tokio::fs::write(path, data).await?;
        if let Err(e) = tokio::fs::write(Self::meta_path(path), raw_meta).await {
            if let Err(cleanup) = tokio::fs::remove_file(path).await {
                warn!("Failed to remove blob {}: {}", path.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, filename: &str, content_type: &str, data: Bytes) -> Result<BlobDescriptor> {
        self.settings.check_size(data.len())?;
        let filename = sanitize_filename(filename)?;
        let pathname = unique_pathname(&filename);
        let path = self.dir.join(&pathname);

        let meta = BlobMeta {
            content_type: content_type.to_string(),
            filename: filename.clone(),
        };
        Self::write_blob(&path, &data, &meta).await?;

        debug!("Stored blob {} ({} bytes)", pathname, data.len());
        Ok(self.settings.describe(&pathname, &filename, content_type))
    }

    async fn get(&self, pathname: &str) -> Result<Option<StoredBlob>> {
        if !is_valid_pathname(pathname) {
            return Ok(None);
        }
        let path = self.dir.join(pathname);

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let meta = match tokio::fs::read(Self::meta_path(&path)).await {
            Ok(raw) => serde_json::from_slice::<BlobMeta>(&raw)?,
            // 旁文件丢失时按扩展名推断
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BlobMeta {
                content_type: super::guess_content_type(pathname).to_string(),
                filename: pathname.to_string(),
            },
            Err(e) => return Err(e.into()),
        };

        Ok(Some(StoredBlob {
            data: Bytes::from(data),
            content_type: meta.content_type,
            filename: meta.filename,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BlobSettings {
        BlobSettings {
            public_base_url: "http://localhost:8080".to_string(),
            max_size: 0,
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), settings()).unwrap();

        let desc = store
            .put("3_9.py", "text/plain", Bytes::from_static(b"print(1)"))
            .await
            .unwrap();
        assert!(desc.pathname.starts_with("3_9-"));
        assert!(desc.url.ends_with(&desc.pathname));
        assert_eq!(desc.content_type, "text/plain");

        let blob = store.get(&desc.pathname).await.unwrap().unwrap();
        assert_eq!(&blob.data[..], b"print(1)");
        assert_eq!(blob.content_type, "text/plain");
        assert_eq!(blob.filename, "3_9.py");
    }

    #[tokio::test]
    async fn test_same_filename_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), settings()).unwrap();

        let first = store
            .put("a.py", "text/plain", Bytes::from_static(b"first"))
            .await
            .unwrap();
        let second = store
            .put("a.py", "text/plain", Bytes::from_static(b"second"))
            .await
            .unwrap();
        assert_ne!(first.pathname, second.pathname);

        let blob = store.get(&first.pathname).await.unwrap().unwrap();
        assert_eq!(&blob.data[..], b"first");
    }

    #[tokio::test]
    async fn test_get_missing_or_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), settings()).unwrap();

        assert!(store.get("nope-123.py").await.unwrap().is_none());
        assert!(store.get("../etc/passwd").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_writes_leave_no_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let meta = BlobMeta {
            content_type: "text/plain".to_string(),
            filename: "a.py".to_string(),
        };

        // 旁文件写入失败时数据文件被删除
        let path = dir.path().join("a-1.py");
        std::fs::create_dir(LocalBlobStore::meta_path(&path)).unwrap();
        assert!(LocalBlobStore::write_blob(&path, b"x", &meta).await.is_err());
        assert!(!path.exists());

        // 数据文件写入失败时不会留下旁文件
        let path = dir.path().join("b-2.py");
        std::fs::create_dir(&path).unwrap();
        assert!(LocalBlobStore::write_blob(&path, b"x", &meta).await.is_err());
        assert!(!LocalBlobStore::meta_path(&path).exists());
    }

    #[tokio::test]
    async fn test_size_limit_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(
            dir.path(),
            BlobSettings {
                public_base_url: String::new(),
                max_size: 2,
            },
        )
        .unwrap();

        let err = store
            .put("a.py", "text/plain", Bytes::from_static(b"abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CodelabError::BlobTooLarge(_)));
    }
}
