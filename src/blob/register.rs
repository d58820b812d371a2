use crate::blob::BlobStore;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedBlobStoreFuture = Pin<Box<dyn Future<Output = Result<Box<dyn BlobStore>>> + Send>>;
pub type BlobStoreConstructor = Arc<dyn Fn() -> BoxedBlobStoreFuture + Send + Sync>;

static BLOB_STORE_REGISTRY: Lazy<RwLock<HashMap<String, BlobStoreConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_blob_store_plugin<S: Into<String>>(name: S, constructor: BlobStoreConstructor) {
    let name = name.into();
    let mut registry = BLOB_STORE_REGISTRY
        .write()
        .expect("Blob store registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_blob_store_plugin(name: &str) -> Option<BlobStoreConstructor> {
    BLOB_STORE_REGISTRY
        .read()
        .expect("Blob store registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_blob_store_registry() {
    let registry = BLOB_STORE_REGISTRY
        .read()
        .expect("Blob store registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No blob store plugins registered.");
    } else {
        tracing::debug!("Registered blob store plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

/// 声明一个 blob 存储插件，程序加载时自动注册到全局表
///
/// 存储类型需要提供 `fn from_config() -> crate::errors::Result<Self>`。
#[macro_export]
macro_rules! declare_blob_store_plugin {
    ($name:literal, $store:ty) => {
        fn __construct_blob_store() -> $crate::blob::register::BoxedBlobStoreFuture {
            ::std::boxed::Box::pin(async {
                let store: $store = <$store>::from_config()?;
                let boxed: ::std::boxed::Box<dyn $crate::blob::BlobStore> =
                    ::std::boxed::Box::new(store);
                $crate::errors::Result::Ok(boxed)
            })
        }

        #[::ctor::ctor]
        unsafe fn __register_blob_store_plugin() {
            $crate::blob::register::register_blob_store_plugin(
                $name,
                ::std::sync::Arc::new(__construct_blob_store),
            );
        }
    };
}
