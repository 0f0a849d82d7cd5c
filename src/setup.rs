// Setup-time checks against the managed store, run once when the dashboard
// starts up.

use chrono::Utc;

use crate::constants::{BUCKET_FILES, BUCKET_FILE_SIZE_LIMIT, CACHE_CONTROL};
use crate::error::CatalogError;
use crate::model::Session;
use crate::store::{CreateBucketOptions, ListOptions, StorageApi, UploadOptions};

#[derive(Debug, Clone, Default)]
pub struct StorageStatus {
    pub bucket_exists: bool,
    pub can_list: bool,
    pub can_upload: bool,
    pub can_delete: bool,
    pub error: Option<String>,
}

/// Confirms the `files` bucket exists, private with the 50MB object limit.
pub async fn verify_bucket(store: &impl StorageApi) -> Result<(), CatalogError> {
    let buckets = store
        .list_buckets()
        .await
        .map_err(|e| CatalogError::BucketCheckFailed(e.to_string()))?;
    if buckets.iter().any(|b| b.name == BUCKET_FILES) {
        Ok(())
    } else {
        Err(CatalogError::BucketMissing)
    }
}

/// Creates the `files` bucket if it is missing.
pub async fn ensure_storage_bucket(store: &impl StorageApi) -> Result<(), CatalogError> {
    match verify_bucket(store).await {
        Ok(()) => Ok(()),
        Err(CatalogError::BucketMissing) => {
            log::info!("## Creating missing bucket: {}", BUCKET_FILES);
            store
                .create_bucket(
                    BUCKET_FILES,
                    CreateBucketOptions {
                        public: false,
                        file_size_limit: Some(BUCKET_FILE_SIZE_LIMIT),
                    },
                )
                .await
                .map_err(|e| CatalogError::BucketCheckFailed(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Probes the store with a tiny temporary object and reports what actually
/// works for this user.
pub async fn check_storage_capabilities(store: &impl StorageApi, session: &Session) -> StorageStatus {
    let mut status = StorageStatus::default();

    match verify_bucket(store).await {
        Ok(()) => status.bucket_exists = true,
        Err(e) => {
            status.error = Some(e.to_string());
            return status;
        }
    }

    status.can_list = store
        .list(session.user_id(), ListOptions::newest_first(1))
        .await
        .is_ok();

    let probe_path = format!("{}/test-{}.txt", session.user_id(), Utc::now().timestamp_millis());
    let probe_opts = UploadOptions {
        cache_control: String::from(CACHE_CONTROL),
        content_type: String::from("text/plain"),
        upsert: false,
    };
    match store.upload(&probe_path, b"test", probe_opts).await {
        Ok(()) => {
            status.can_upload = true;
            status.can_delete = store.remove(std::slice::from_ref(&probe_path)).await.is_ok();
        }
        Err(e) => {
            status.error = Some(format!("Upload test failed: {}", e));
        }
    }

    status
}
