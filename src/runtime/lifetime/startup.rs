use crate::blob::{BlobStore, register::get_blob_store_plugin};
use crate::config::AppConfig;
use crate::errors::{CodelabError, Result};
use crate::feedback::FeedbackProvider;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_INSTRUCTOR_EMAIL: &str = "instructor@localhost";
const FALLBACK_BLOB_BACKEND: &str = "memory";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub blob_store: Arc<dyn BlobStore>,
    pub feedback: Arc<dyn FeedbackProvider>,
}

async fn build_blob_store(backend: &str) -> Result<Arc<dyn BlobStore>> {
    let constructor = get_blob_store_plugin(backend).ok_or_else(|| {
        CodelabError::blob_store_plugin_not_found(format!("'{backend}' is not registered"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 创建 blob 存储，配置的后端不可用时回退到内存存储
async fn create_blob_store() -> Result<Arc<dyn BlobStore>> {
    let backend = &AppConfig::get().blob.backend;
    warn!("Attempting to create {} blob store", backend);

    match build_blob_store(backend).await {
        Ok(store) => {
            warn!("Successfully created {} blob store", backend);
            Ok(store)
        }
        Err(e) if backend != FALLBACK_BLOB_BACKEND => {
            warn!("Failed to create {} blob store: {}", backend, e);
            warn!("Falling back to {} blob store, uploads will not survive a restart", FALLBACK_BLOB_BACKEND);
            build_blob_store(FALLBACK_BLOB_BACKEND).await
        }
        Err(e) => Err(e),
    }
}

/// 数据库中没有任何用户时创建默认讲师账号
async fn seed_instructor(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping instructor seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default instructor account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping instructor seed", e);
            return;
        }
    }

    let request = CreateUserRequest {
        email: DEFAULT_INSTRUCTOR_EMAIL.to_string(),
        name: Some("Instructor".to_string()),
        role: UserRole::Instructor,
    };

    match storage.create_user(request).await {
        Ok(user) => info!(
            "Default instructor account created (ID: {}, email: {})",
            user.id, user.email
        ),
        Err(e) => warn!("Failed to create instructor account: {}", e),
    }
}

/// 准备服务器启动的上下文：存储、blob 存储和反馈协作方
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::blob::register::debug_blob_store_registry();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_instructor(&storage).await;

    let blob_store = create_blob_store()
        .await
        .expect("Failed to create blob store");

    let feedback =
        crate::feedback::create_feedback_provider().expect("Failed to create feedback provider");
    warn!("Feedback provider initialized");

    StartupContext {
        storage,
        blob_store,
        feedback,
    }
}
