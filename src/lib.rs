pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod setup;
pub mod stats;
pub mod store;
pub mod utils;

pub use catalog::{require_session, FileCatalog, UploadOutcome};
pub use config::Config;
pub use error::{CatalogError, RejectReason, Rejection};
pub use model::{FileCategory, FileRecord, FilterState, Session, TypeFilter, UploadFile, User};
pub use stats::{summarize, CategoryUsage, StorageUsage};
pub use store::{IdentityApi, StorageApi, SupabaseClient};
