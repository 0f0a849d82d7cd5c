use thiserror::Error;

use crate::constants::{
    MESSAGE_BUCKET_MISSING, MESSAGE_DELETE_FAILED, MESSAGE_DOWNLOAD_FAILED,
    MESSAGE_FILES_REJECTED, MESSAGE_LOAD_FAILED, MESSAGE_NOT_AUTHENTICATED,
    MESSAGE_UPLOAD_FAILED,
};

/// Why a file was excluded from an upload batch before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooLarge,
    WrongType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

/// Everything the view model can report to the presentation layer. Remote
/// failures carry the upstream message; raw transport errors never escape.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{}", MESSAGE_NOT_AUTHENTICATED)]
    NotAuthenticated,

    #[error("{}: {}", MESSAGE_LOAD_FAILED, .0)]
    LoadFailed(String),

    #[error("{}: {}", MESSAGE_UPLOAD_FAILED, .0)]
    UploadFailed(String),

    #[error("{}", MESSAGE_FILES_REJECTED)]
    SomeFilesRejected(Vec<Rejection>),

    #[error("{}: {}", MESSAGE_DELETE_FAILED, .0)]
    DeleteFailed(String),

    #[error("{}: {}", MESSAGE_DOWNLOAD_FAILED, .0)]
    DownloadFailed(String),

    #[error("{}", MESSAGE_BUCKET_MISSING)]
    BucketMissing,

    #[error("Bucket check failed: {0}")]
    BucketCheckFailed(String),
}
