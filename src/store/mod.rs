mod object_store;
mod supabase;

#[cfg(test)]
pub mod mem_store;

pub use object_store::{
    Bucket, CreateBucketOptions, IdentityApi, ListOptions, SortBy, StorageApi, UploadOptions,
};
pub use supabase::SupabaseClient;
