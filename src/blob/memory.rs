use actix_web::web::Bytes;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::blob::{BlobSettings, BlobStore, StoredBlob, sanitize_filename, unique_pathname};
use crate::declare_blob_store_plugin;
use crate::errors::Result;
use crate::models::blobs::BlobDescriptor;

declare_blob_store_plugin!("memory", MemoryBlobStore);

/// 进程内存储，重启即丢失，用于开发和测试
pub struct MemoryBlobStore {
    blobs: DashMap<String, StoredBlob>,
    settings: BlobSettings,
}

impl MemoryBlobStore {
    pub fn new(settings: BlobSettings) -> Self {
        Self {
            blobs: DashMap::new(),
            settings,
        }
    }

    pub fn from_config() -> Result<Self> {
        Ok(Self::new(BlobSettings::from_config()))
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, filename: &str, content_type: &str, data: Bytes) -> Result<BlobDescriptor> {
        self.settings.check_size(data.len())?;
        let filename = sanitize_filename(filename)?;
        let pathname = unique_pathname(&filename);

        let descriptor = self.settings.describe(&pathname, &filename, content_type);
        self.blobs.insert(
            pathname,
            StoredBlob {
                data,
                content_type: content_type.to_string(),
                filename,
            },
        );
        Ok(descriptor)
    }

    async fn get(&self, pathname: &str) -> Result<Option<StoredBlob>> {
        Ok(self.blobs.get(pathname).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryBlobStore::new(BlobSettings {
            public_base_url: "https://codelab.test".to_string(),
            max_size: 0,
        });
        assert!(store.is_empty());

        let desc = store
            .put("1_1.js", "text/plain", Bytes::from_static(b"console.log(1)"))
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(desc.url.starts_with("https://codelab.test/api/blobs/1_1-"));

        let blob = store.get(&desc.pathname).await.unwrap().unwrap();
        assert_eq!(&blob.data[..], b"console.log(1)");
        assert!(store.get("missing").await.unwrap().is_none());
    }
}
