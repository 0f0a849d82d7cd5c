mod file_model;
mod user_model;

pub use file_model::{FileCategory, FileRecord, FilterState, TypeFilter, UploadFile};
pub use user_model::{Session, User};
