use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{FileRecord, Session, User};

#[derive(Debug, Clone)]
pub struct SortBy {
    pub column: String,
    pub order: String,
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
    pub sort_by: Option<SortBy>,
}

impl ListOptions {
    /// Most-recently-modified first, the order the catalog always asks for.
    pub fn newest_first(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            sort_by: Some(SortBy {
                column: String::from("updated_at"),
                order: String::from("desc"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub cache_control: String,
    pub content_type: String,
    pub upsert: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone)]
pub struct CreateBucketOptions {
    pub public: bool,
    pub file_size_limit: Option<u64>,
}

/// Object operations against the managed store, all scoped to the `files`
/// bucket. Returned record names are full storage paths (`<user_id>/<file>`).
#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn list(&self, prefix: &str, opts: ListOptions) -> Result<Vec<FileRecord>>;
    async fn upload(&self, path: &str, bytes: &[u8], opts: UploadOptions) -> Result<()>;
    async fn download(&self, path: &str) -> Result<Vec<u8>>;
    async fn remove(&self, paths: &[String]) -> Result<()>;
    async fn list_buckets(&self) -> Result<Vec<Bucket>>;
    async fn create_bucket(&self, name: &str, opts: CreateBucketOptions) -> Result<()>;
}

/// Session operations against the identity provider. Absence of a user is
/// signalled with `None`, never an error.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    async fn get_current_user(&self) -> Result<Option<User>>;
    async fn current_session(&self) -> Result<Option<Session>>;
    async fn sign_out(&self) -> Result<()>;
}
