use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::constants::{CACHE_CONTROL, LIST_LIMIT, MAX_FILE_SIZE};
use crate::error::{CatalogError, RejectReason, Rejection};
use crate::model::{FileRecord, FilterState, Session, TypeFilter, UploadFile};
use crate::store::{IdentityApi, ListOptions, StorageApi, UploadOptions};
use crate::utils::{file_ext, owner_of};

pub type ProgressFn<'a> = dyn Fn(f64) + Send + Sync + 'a;

#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub uploaded: usize,
    pub rejected: Vec<Rejection>,
}

/// Resolves the ambient session or reports `NotAuthenticated`. Presentation
/// code calls this once and passes the session into every catalog operation.
pub async fn require_session(identity: &dyn IdentityApi) -> Result<Session, CatalogError> {
    identity
        .current_session()
        .await
        .ok()
        .flatten()
        .ok_or(CatalogError::NotAuthenticated)
}

/// Client-side source of truth for "what files does this user have, in what
/// order, matching what filter". The store stays authoritative; the catalog
/// reconciles its listing with local filter state and in-flight mutations.
pub struct FileCatalog<'a, S: StorageApi> {
    store: &'a S,
    files: Vec<FileRecord>,
    visible: Vec<FileRecord>,
    filter: FilterState,
    deleting: HashSet<String>,
    loaded: bool,
}

impl<'a, S: StorageApi> FileCatalog<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            files: Vec::new(),
            visible: Vec::new(),
            filter: FilterState::default(),
            deleting: HashSet::new(),
            loaded: false,
        }
    }

    /// The full snapshot from the last successful load.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// The snapshot with the current filter applied.
    pub fn visible(&self) -> &[FileRecord] {
        &self.visible
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// True while a delete for this record id is outstanding; the caller
    /// must disable the action rather than issue a second remove.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    /// Replaces the snapshot wholesale with the store's listing for the
    /// session user. On failure the previous snapshot is preserved, unless
    /// this was the first load.
    pub async fn load(&mut self, session: &Session) -> Result<(), CatalogError> {
        match self.store.list(session.user_id(), ListOptions::newest_first(LIST_LIMIT)).await {
            Ok(mut records) => {
                records.retain(|r| owner_of(&r.name) == session.user_id());
                // stable sort keeps the store's tie order within equal timestamps
                records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                log::info!("## Loaded {} files for {}", records.len(), session.user_id());
                self.files = records;
                self.loaded = true;
                self.recompute_visible();
                Ok(())
            }
            Err(e) => {
                if !self.loaded {
                    self.files.clear();
                    self.visible.clear();
                }
                Err(CatalogError::LoadFailed(e.to_string()))
            }
        }
    }

    /// Pure and synchronous; recomputes the visible list without touching
    /// the snapshot.
    pub fn apply_filter(&mut self, state: FilterState) {
        self.filter = state;
        self.recompute_visible();
    }

    fn recompute_visible(&mut self) {
        let term = self.filter.search_term.to_lowercase();
        let type_filter = self.filter.type_filter;
        self.visible = self
            .files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term) && type_filter.matches(f.category()))
            .cloned()
            .collect();
    }

    /// Validates, then uploads the accepted files concurrently under
    /// collision-resistant names. Progress is completion-count based. Any
    /// individual failure reports the whole batch as failed; files already
    /// uploaded stay remote and show up on the next successful load.
    pub async fn upload(
        &mut self,
        session: &Session,
        files: Vec<UploadFile>,
        expected: TypeFilter,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<UploadOutcome, CatalogError> {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            if file.size() > MAX_FILE_SIZE {
                rejected.push(Rejection { name: file.name, reason: RejectReason::TooLarge });
            } else if !validate_file_type(&file.name, expected) {
                rejected.push(Rejection { name: file.name, reason: RejectReason::WrongType });
            } else {
                accepted.push(file);
            }
        }

        if accepted.is_empty() {
            if rejected.is_empty() {
                return Ok(UploadOutcome { uploaded: 0, rejected });
            }
            return Err(CatalogError::SomeFilesRejected(rejected));
        }

        let store = self.store;
        let total = accepted.len();
        let completed = AtomicUsize::new(0);
        let results = futures::future::join_all(accepted.iter().map(|file| {
            let path = storage_name(session.user_id(), &file.name);
            let opts = UploadOptions {
                cache_control: String::from(CACHE_CONTROL),
                content_type: file.content_type(),
                upsert: false,
            };
            let completed = &completed;
            async move {
                let result = store.upload(&path, &file.bytes, opts).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(report) = progress {
                    report(done as f64 / total as f64 * 100.0);
                }
                result
            }
        }))
        .await;

        if let Some(err) = results.into_iter().find_map(|r| r.err()) {
            return Err(CatalogError::UploadFailed(err.to_string()));
        }

        // the store assigns final metadata, so reload instead of patching
        self.load(session).await?;
        Ok(UploadOutcome { uploaded: total, rejected })
    }

    /// Deletes one record remotely and patches it out of the snapshot and
    /// the visible view. The caller must have confirmed intent. On failure
    /// the snapshot is left untouched.
    pub async fn remove(&mut self, session: &Session, record: &FileRecord) -> Result<(), CatalogError> {
        if owner_of(&record.name) != session.user_id() {
            return Err(CatalogError::DeleteFailed(String::from(
                "record does not belong to the current user",
            )));
        }
        self.deleting.insert(record.id.clone());
        let result = self.store.remove(std::slice::from_ref(&record.name)).await;
        self.deleting.remove(&record.id);
        match result {
            Ok(()) => {
                self.files.retain(|f| f.id != record.id);
                self.visible.retain(|f| f.id != record.id);
                Ok(())
            }
            Err(e) => Err(CatalogError::DeleteFailed(e.to_string())),
        }
    }

    /// Fetches the blob for local saving. No retry.
    pub async fn download(&self, session: &Session, record: &FileRecord) -> Result<Vec<u8>, CatalogError> {
        if owner_of(&record.name) != session.user_id() {
            return Err(CatalogError::DownloadFailed(String::from(
                "record does not belong to the current user",
            )));
        }
        self.store
            .download(&record.name)
            .await
            .map_err(|e| CatalogError::DownloadFailed(e.to_string()))
    }
}

fn validate_file_type(name: &str, expected: TypeFilter) -> bool {
    let allowed = expected.allowed_exts();
    if allowed.is_empty() {
        return true;
    }
    match file_ext(name) {
        Some(ext) => allowed.contains(&format!(".{}", ext).as_str()),
        None => false,
    }
}

fn storage_name(user_id: &str, original_name: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    match file_ext(original_name) {
        Some(ext) => format!("{}/{}-{}.{}", user_id, Utc::now().timestamp_millis(), token, ext),
        None => format!("{}/{}-{}", user_id, Utc::now().timestamp_millis(), token),
    }
}
