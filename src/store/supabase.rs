// Client for the Supabase storage/auth REST endpoints. Constructed once at
// session start and passed by reference to the view model.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::constants::BUCKET_FILES;
use crate::model::{FileRecord, Session, User};
use crate::store::object_store::{
    Bucket, CreateBucketOptions, IdentityApi, ListOptions, StorageApi, UploadOptions,
};

pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    bucket: String,
    session: RwLock<Option<Session>>,
}

#[derive(Deserialize)]
struct ObjectMetadata {
    size: Option<u64>,
    mimetype: Option<String>,
}

#[derive(Deserialize)]
struct ObjectEntry {
    name: String,
    id: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    metadata: Option<ObjectMetadata>,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    user: Option<User>,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            bucket: String::from(BUCKET_FILES),
            session: RwLock::new(None),
        }
    }

    fn token(&self) -> String {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(self.token())
    }

    async fn ok_or_message(resp: Response) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "error_description", "error", "msg"]
                    .iter()
                    .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(String::from))
            })
            .unwrap_or(body);
        if message.is_empty() {
            Err(anyhow!("request failed with status {}", status))
        } else {
            Err(anyhow!(message))
        }
    }

    fn session_from(&self, resp: AuthResponse) -> Result<Session> {
        let user = resp.user.ok_or_else(|| anyhow!("no user in auth response"))?;
        let session = Session {
            user,
            access_token: resp.access_token.unwrap_or_default(),
        };
        *self.session.write().unwrap() = Some(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl IdentityApi for SupabaseClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .request(self.http.post(self.auth_url("signup")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = Self::ok_or_message(resp).await?;
        self.session_from(resp.json::<AuthResponse>().await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .request(self.http.post(self.auth_url("token?grant_type=password")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = Self::ok_or_message(resp).await?;
        self.session_from(resp.json::<AuthResponse>().await?)
    }

    async fn get_current_user(&self) -> Result<Option<User>> {
        if self.session.read().unwrap().is_none() {
            return Ok(None);
        }
        let resp = self.request(self.http.get(self.auth_url("user"))).send().await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let resp = Self::ok_or_message(resp).await?;
        Ok(Some(resp.json::<User>().await?))
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.read().unwrap().clone())
    }

    async fn sign_out(&self) -> Result<()> {
        let resp = self
            .request(self.http.post(self.auth_url("logout")))
            .send()
            .await?;
        // local session goes away even if the server call was rejected
        *self.session.write().unwrap() = None;
        Self::ok_or_message(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageApi for SupabaseClient {
    async fn list(&self, prefix: &str, opts: ListOptions) -> Result<Vec<FileRecord>> {
        let mut body = json!({
            "prefix": prefix,
            "limit": opts.limit,
            "offset": opts.offset,
        });
        if let Some(sort) = &opts.sort_by {
            body["sortBy"] = json!({ "column": sort.column, "order": sort.order });
        }
        let resp = self
            .request(self.http.post(self.storage_url(&format!("object/list/{}", self.bucket))))
            .json(&body)
            .send()
            .await?;
        let resp = Self::ok_or_message(resp).await?;
        let entries = resp.json::<Vec<ObjectEntry>>().await?;

        let records = entries
            .into_iter()
            // folder placeholders come back without an object id
            .filter_map(|entry| {
                let id = entry.id?;
                let name = if prefix.is_empty() {
                    entry.name
                } else {
                    format!("{}/{}", prefix, entry.name)
                };
                let metadata = entry.metadata;
                Some(FileRecord {
                    id,
                    name,
                    updated_at: entry.updated_at.unwrap_or(DateTime::<Utc>::MIN_UTC),
                    size: metadata.as_ref().and_then(|m| m.size).unwrap_or(0),
                    mimetype: metadata.and_then(|m| m.mimetype).unwrap_or_default(),
                })
            })
            .collect();
        Ok(records)
    }

    async fn upload(&self, path: &str, bytes: &[u8], opts: UploadOptions) -> Result<()> {
        log::info!("## Uploading: {} ({} bytes)", path, bytes.len());
        let resp = self
            .request(self.http.post(self.storage_url(&format!("object/{}/{}", self.bucket, path))))
            .header("cache-control", &opts.cache_control)
            .header("content-type", &opts.content_type)
            .header("x-upsert", if opts.upsert { "true" } else { "false" })
            .body(bytes.to_vec())
            .send()
            .await?;
        Self::ok_or_message(resp).await?;
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        log::info!("## Downloading: {}", path);
        let resp = self
            .request(self.http.get(self.storage_url(&format!("object/{}/{}", self.bucket, path))))
            .send()
            .await?;
        let resp = Self::ok_or_message(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        log::info!("## Deleting: {:?}", paths);
        let resp = self
            .request(self.http.delete(self.storage_url(&format!("object/{}", self.bucket))))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::ok_or_message(resp).await?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let resp = self
            .request(self.http.get(self.storage_url("bucket")))
            .send()
            .await?;
        let resp = Self::ok_or_message(resp).await?;
        Ok(resp.json::<Vec<Bucket>>().await?)
    }

    async fn create_bucket(&self, name: &str, opts: CreateBucketOptions) -> Result<()> {
        log::info!("## Creating bucket: {}", name);
        let resp = self
            .request(self.http.post(self.storage_url("bucket")))
            .json(&json!({
                "id": name,
                "name": name,
                "public": opts.public,
                "file_size_limit": opts.file_size_limit,
            }))
            .send()
            .await?;
        Self::ok_or_message(resp).await?;
        Ok(())
    }
}
