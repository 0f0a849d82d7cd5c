// In-memory stand-in for the managed store, used by the tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::FileRecord;
use crate::store::object_store::{
    Bucket, CreateBucketOptions, ListOptions, StorageApi, UploadOptions,
};

struct StoredObject {
    id: String,
    bytes: Vec<u8>,
    mimetype: String,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    buckets: Mutex<Vec<Bucket>>,
    fail_ops: Mutex<HashMap<&'static str, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket() -> Self {
        let store = Self::default();
        store.buckets.lock().unwrap().push(Bucket {
            id: String::from("files"),
            name: String::from("files"),
            public: false,
        });
        store
    }

    pub fn seed(&self, path: &str, bytes: Vec<u8>, mimetype: &str, updated_at: DateTime<Utc>) {
        self.objects.lock().unwrap().insert(
            path.to_string(),
            StoredObject {
                id: Uuid::new_v4().to_string(),
                bytes,
                mimetype: mimetype.to_string(),
                updated_at,
            },
        );
    }

    /// Every subsequent call of `op` fails with `message`.
    pub fn fail_on(&self, op: &'static str, message: &str) {
        self.fail_ops.lock().unwrap().insert(op, message.to_string());
    }

    pub fn clear_failures(&self) {
        self.fail_ops.lock().unwrap().clear();
    }

    pub fn stored_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn check(&self, op: &'static str) -> Result<()> {
        if let Some(msg) = self.fail_ops.lock().unwrap().get(op) {
            bail!("{}", msg);
        }
        Ok(())
    }
}

#[async_trait]
impl StorageApi for MemStore {
    async fn list(&self, prefix: &str, opts: ListOptions) -> Result<Vec<FileRecord>> {
        self.check("list")?;
        let objects = self.objects.lock().unwrap();
        let mut records: Vec<FileRecord> = objects
            .iter()
            .filter(|(path, _)| prefix.is_empty() || path.starts_with(&format!("{}/", prefix)))
            .map(|(path, obj)| FileRecord {
                id: obj.id.clone(),
                name: path.clone(),
                updated_at: obj.updated_at,
                size: obj.bytes.len() as u64,
                mimetype: obj.mimetype.clone(),
            })
            .collect();
        if let Some(sort) = &opts.sort_by {
            if sort.column == "updated_at" {
                if sort.order == "desc" {
                    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                } else {
                    records.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
                }
            }
        }
        let records = records
            .into_iter()
            .skip(opts.offset as usize)
            .take(opts.limit as usize)
            .collect();
        Ok(records)
    }

    async fn upload(&self, path: &str, bytes: &[u8], opts: UploadOptions) -> Result<()> {
        self.check("upload")?;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(path) && !opts.upsert {
            bail!("The resource already exists");
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                id: Uuid::new_v4().to_string(),
                bytes: bytes.to_vec(),
                mimetype: opts.content_type,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.check("download")?;
        let objects = self.objects.lock().unwrap();
        match objects.get(path) {
            Some(obj) => Ok(obj.bytes.clone()),
            None => bail!("Object not found"),
        }
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        self.check("remove")?;
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        self.check("list_buckets")?;
        Ok(self.buckets.lock().unwrap().clone())
    }

    async fn create_bucket(&self, name: &str, opts: CreateBucketOptions) -> Result<()> {
        self.check("create_bucket")?;
        let mut buckets = self.buckets.lock().unwrap();
        if buckets.iter().any(|b| b.name == name) {
            bail!("Bucket already exists");
        }
        buckets.push(Bucket {
            id: name.to_string(),
            name: name.to_string(),
            public: opts.public,
        });
        Ok(())
    }
}
